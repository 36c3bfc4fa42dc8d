//! 스캐너의 도메인 모델.

pub mod candle;
pub mod market_source;
pub mod scan;

pub use candle::*;
pub use market_source::*;
pub use scan::*;
