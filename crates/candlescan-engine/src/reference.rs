//! 기준 캔들 선택기.
//!
//! 최근 윈도우에서 몸통이 가장 큰 양봉을 패턴의 기준 캔들로 선택합니다.

use candlescan_core::{Candle, ReferenceCandle};
use rust_decimal::Decimal;

/// 기준 캔들을 찾을 최근 윈도우 크기.
pub const REFERENCE_WINDOW: usize = 10;

/// 시리즈 끝에서 기준 캔들이 위치할 수 없는 후행 캔들 수.
///
/// 패턴 검증에는 기준 캔들 뒤로 최소 이 수만큼의 캔들이 필요하다.
pub const TRAILING_EXCLUSION: usize = 3;

/// 시리즈에서 기준 캔들을 선택합니다.
///
/// 마지막 `REFERENCE_WINDOW`개 캔들(시리즈가 더 짧으면 전체) 중에서
/// `close - open`이 가장 큰 양봉을 찾습니다. 엄격 비교를 사용하므로
/// 동률일 때는 윈도우에서 먼저 나온 캔들이 유지됩니다.
///
/// 적합한 양봉이 없거나, 선택된 캔들이 시리즈의 마지막
/// `TRAILING_EXCLUSION`개 안에 있으면 `None`을 반환합니다.
///
/// 반환값이 `Some`이면 `index + TRAILING_EXCLUSION < series.len()`이고
/// 해당 캔들은 양봉임이 보장됩니다.
pub fn select_reference(series: &[Candle]) -> Option<ReferenceCandle> {
    let window_start = series.len().saturating_sub(REFERENCE_WINDOW);

    let mut max_difference = Decimal::ZERO;
    let mut ref_index: Option<usize> = None;

    for (offset, candle) in series[window_start..].iter().enumerate() {
        let difference = candle.close - candle.open;

        if difference > max_difference && candle.is_bullish() {
            max_difference = difference;
            ref_index = Some(window_start + offset);
        }
    }

    let index = ref_index?;

    // 기준 캔들 뒤로 검증할 캔들이 모자라면 사용할 수 없다
    if index >= series.len().saturating_sub(TRAILING_EXCLUSION) {
        return None;
    }

    Some(ReferenceCandle::from_candle(&series[index], index))
}
