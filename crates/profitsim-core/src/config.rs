//! 설정 관리.
//!
//! TOML 파일과 `PROFITSIM__` 접두사 환경 변수를 겹쳐 [`SimConfig`]를 만듭니다.
//! 모든 섹션은 기본값을 가지므로 파일이 없어도 동작합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::{PortfolioEngine, PriceModel};
use crate::error::SimResult;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SimConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 엔진 설정
    #[serde(default)]
    pub engine: EngineConfig,
    /// 차트 설정
    #[serde(default)]
    pub chart: ChartConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// 엔진 설정.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// 가격 재계산 방식
    #[serde(default)]
    pub price_model: PriceModel,
}

impl EngineConfig {
    /// 설정에 맞는 엔진을 생성합니다.
    pub fn build_engine(&self) -> PortfolioEngine {
        PortfolioEngine::new(self.price_model)
    }
}

/// 차트 가로축 배치 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPolicy {
    /// 노드 순번 기준 등간격 배치
    #[default]
    IndexSpaced,
    /// 보유 비율 값을 두 번째 선형 축으로 사용
    HoldingPercent,
}

impl std::str::FromStr for AxisPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "index_spaced" | "index" => Ok(Self::IndexSpaced),
            "holding_percent" | "holding" => Ok(Self::HoldingPercent),
            _ => Err(format!("Unknown axis policy: {}", s)),
        }
    }
}

/// 플롯 영역 바깥 여백.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 24.0,
            bottom: 44.0,
            left: 56.0,
        }
    }
}

/// 차트 설정.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ChartConfig {
    /// 가로축 배치 방식
    #[serde(default)]
    pub axis_policy: AxisPolicy,
    /// 논리 캔버스 너비
    #[serde(default = "default_width")]
    pub width: f64,
    /// 논리 캔버스 높이
    #[serde(default = "default_height")]
    pub height: f64,
    /// 여백
    #[serde(default)]
    pub padding: Padding,
    /// 격자 분할 수
    #[serde(default = "default_grid_divisions")]
    pub grid_divisions: u32,
}

fn default_width() -> f64 {
    640.0
}

fn default_height() -> f64 {
    300.0
}

fn default_grid_divisions() -> u32 {
    4
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            axis_policy: AxisPolicy::default(),
            width: default_width(),
            height: default_height(),
            padding: Padding::default(),
            grid_divisions: default_grid_divisions(),
        }
    }
}

impl SimConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("PROFITSIM")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> SimResult<Self> {
        Self::load("config/default.toml")
    }
}
