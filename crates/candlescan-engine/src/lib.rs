//! # CandleScan Engine
//!
//! 캔들 패턴 스캔의 핵심 로직을 제공합니다:
//! - 후보 페어 필터
//! - 기준 캔들 선택기
//! - 후속 캔들 검증기
//! - 스캔 오케스트레이터 및 통계

pub mod filter;
pub mod reference;
pub mod scanner;
pub mod stats;
pub mod validate;

pub use filter::filter_candidates;
pub use reference::{select_reference, REFERENCE_WINDOW, TRAILING_EXCLUSION};
pub use scanner::{Scanner, SharedScanState};
pub use stats::ScanStats;
pub use validate::{validate_follow_on, CLOSE_FLOOR_RATIO};
