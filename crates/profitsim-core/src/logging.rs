//! tracing을 사용한 로깅 초기화.
//!
//! 출력 형식은 세 가지입니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 로그 수집용 JSON 형식
//! - **compact**: 한 줄 형식

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::error::{SimError, SimResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 여러 줄 형식
    #[default]
    Pretty,
    /// JSON 한 줄 형식
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "profitsim_core=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// span 진입/종료 이벤트 포함 여부
    pub with_span_events: bool,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// 설정 파일의 `[logging]` 섹션에서 생성합니다.
    pub fn from_settings(settings: &LoggingConfig) -> SimResult<Self> {
        let format = settings.format.parse().map_err(SimError::Config)?;
        Ok(Self::new(settings.level.clone()).with_format(format))
    }

    /// 환경 변수(`RUST_LOG`, `LOG_FORMAT`)에서 생성합니다.
    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self::new(level).with_format(format)
    }
}

macro_rules! configure_fmt {
    ($layer:expr, $config:expr, $span_events:expr) => {
        $layer
            .with_file($config.with_file)
            .with_line_number($config.with_file)
            .with_target($config.with_target)
            .with_span_events($span_events.clone())
    };
}

/// 전역 subscriber를 설치합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨보다 우선합니다. 이미 설치된
/// subscriber가 있으면 `Config` 에러를 반환합니다.
///
/// ```no_run
/// use profitsim_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("debug").with_format(LogFormat::Compact)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> SimResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| SimError::Config(format!("로그 레벨 파싱 실패: {}", e)))?;

    let span_events = if config.with_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => configure_fmt!(fmt::layer().pretty(), config, span_events).boxed(),
        LogFormat::Json => configure_fmt!(fmt::layer().json(), config, span_events).boxed(),
        LogFormat::Compact => configure_fmt!(fmt::layer().compact(), config, span_events).boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| SimError::Config(format!("로깅 초기화 실패: {}", e)))?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 세션 ID가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! session_span {
    ($name:expr, $session_id:expr) => {
        tracing::info_span!($name, session_id = %$session_id)
    };
    ($name:expr, $session_id:expr, $sequence:expr) => {
        tracing::info_span!($name, session_id = %$session_id, sequence = $sequence)
    };
}
