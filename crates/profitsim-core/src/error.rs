//! 시뮬레이터의 에러 타입.
//!
//! 엔진이 반환하는 네 가지 입력 에러와 설정/직렬화 계층의 에러를 정의합니다.
//! 모든 엔진 에러는 동기적으로 감지되며 세션 상태를 변경하지 않습니다.

use thiserror::Error;

/// 에러 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    OutOfRange,
    NotInitialized,
    NoHoldings,
    Config,
    Serialization,
}

/// 시뮬레이터 에러.
#[derive(Debug, Error)]
pub enum SimError {
    /// 유한한 양수가 필요한 곳에 잘못된 값이 들어옴
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 매도 비율이 0~100 범위를 벗어남
    #[error("범위 초과: {0}")]
    OutOfRange(String),

    /// 초기 가치 설정 전에 노드를 추가하려 함
    #[error("초기화되지 않음: 먼저 초기 매수 가치를 입력하세요")]
    NotInitialized,

    /// 보유 수량이 없는 상태에서 매도 요청
    #[error("보유 없음: 현재 매도할 보유 수량이 없습니다")]
    NoHoldings,

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 시뮬레이터 작업을 위한 Result 타입.
pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// 에러 분류를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::InvalidInput(_) => ErrorKind::InvalidInput,
            SimError::OutOfRange(_) => ErrorKind::OutOfRange,
            SimError::NotInitialized => ErrorKind::NotInitialized,
            SimError::NoHoldings => ErrorKind::NoHoldings,
            SimError::Config(_) => ErrorKind::Config,
            SimError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// 사용자가 입력을 고쳐 다시 시도할 수 있는 에러인지 확인합니다.
    ///
    /// 엔진 에러는 모두 복구 가능하며 자동 재시도는 하지 않습니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SimError::InvalidInput(_)
                | SimError::OutOfRange(_)
                | SimError::NotInitialized
                | SimError::NoHoldings
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for SimError {
    fn from(err: config::ConfigError) -> Self {
        SimError::Config(err.to_string())
    }
}
