//! 정밀한 가격 계산을 위한 Decimal 타입 별칭.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;
