//! 스캔 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 한 번의 스캔에 대한 통계.
///
/// `total`은 처리를 시작한 후보 수이며, 중단된 스캔에서는
/// `matched + no_pattern + empty`보다 1 클 수 있다 (실패한 후보가
/// `total`에는 포함되지만 어느 결과 분류에도 들어가지 않는다).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// 처리를 시작한 후보 수
    pub total: usize,
    /// 패턴과 일치한 수
    pub matched: usize,
    /// 패턴 불일치로 건너뛴 수
    pub no_pattern: usize,
    /// 빈 시리즈 (조회 성공, 캔들 없음)
    pub empty: usize,
    /// 조회 실패로 스캔이 중단되었는지 여부
    pub aborted: bool,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ScanStats {
    /// 새 통계 객체 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 일치율 계산 (%).
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.matched as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력.
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            matched = self.matched,
            no_pattern = self.no_pattern,
            empty = self.empty,
            aborted = self.aborted,
            match_rate = format!("{:.1}%", self.match_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "스캔 완료"
        );
    }
}
