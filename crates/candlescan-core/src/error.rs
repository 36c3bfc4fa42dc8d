//! 스캐너의 에러 타입.
//!
//! 이 모듈은 스캐너 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 스캐너 에러.
#[derive(Debug, Error)]
pub enum ScannerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 소스 에러
    #[error("데이터 소스 에러: {0}")]
    Source(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 스캐너 작업을 위한 Result 타입.
pub type ScannerResult<T> = Result<T, ScannerError>;

impl From<serde_json::Error> for ScannerError {
    fn from(err: serde_json::Error) -> Self {
        ScannerError::Serialization(err.to_string())
    }
}

impl From<crate::domain::SourceError> for ScannerError {
    fn from(err: crate::domain::SourceError) -> Self {
        ScannerError::Source(err.to_string())
    }
}
