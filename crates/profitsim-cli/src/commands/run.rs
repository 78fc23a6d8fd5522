//! 시나리오 실행 명령어.
//!
//! 초기 가치와 노드 목록이 담긴 파일을 읽어 순서대로 적용하고 결과를 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! profitsim run scenarios/sample.toml
//! profitsim run scenarios/sample.toml --format json
//! ```
//!
//! # 시나리오 형식
//!
//! ```toml
//! initial_value = 1000
//!
//! [[events]]
//! change_percent = 10
//! trade = "sell"
//! percent = 50
//!
//! [[events]]
//! change_percent = -5
//! trade = "buy"
//! amount = 200
//! ```

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use profitsim_chart::{node_list, ChartProjection, ChartProjector, NodeListEntry, SummaryDisplay};
use profitsim_core::{ChartConfig, EventRecord, EventRequest, PortfolioEngine, Session, SummaryView};

use super::render::{render_chart, render_nodes, render_summary, OutputFormat};

/// 시나리오 파일.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    /// 초기 매수 가치
    pub initial_value: Decimal,
    /// 적용할 노드 (순서대로)
    #[serde(default)]
    pub events: Vec<EventRequest>,
}

/// 시나리오 실행 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub session_id: String,
    pub summary: Option<SummaryView>,
    pub display: SummaryDisplay,
    pub events: Vec<EventRecord>,
    pub nodes: Vec<NodeListEntry>,
    pub chart: ChartProjection,
}

impl ScenarioReport {
    /// 형식에 맞게 출력 문자열을 만듭니다.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok([
                render_summary(&self.display),
                render_nodes(&self.nodes),
                render_chart(&self.chart),
            ]
            .join("\n\n")),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// 시나리오 파일 로드 (.toml 또는 .json)
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(anyhow!("Scenario file not found: {}", path.display()));
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(toml::from_str(&content)?)
    } else if path.extension().is_some_and(|ext| ext == "json") {
        Ok(serde_json::from_str(&content)?)
    } else {
        Err(anyhow!(
            "Unsupported scenario format. Use .toml or .json: {}",
            path.display()
        ))
    }
}

/// 시나리오를 새 세션에 적용합니다. 첫 번째로 실패한 노드에서 중단합니다.
pub fn run_scenario(
    scenario: &Scenario,
    engine: PortfolioEngine,
    chart: ChartConfig,
) -> Result<ScenarioReport> {
    let mut session = Session::new(engine);
    session
        .initialize(scenario.initial_value)
        .context("초기화 실패")?;

    for (index, request) in scenario.events.iter().enumerate() {
        session
            .apply_event(*request)
            .with_context(|| format!("노드 {} 적용 실패", index + 1))?;
    }
    debug!(events = session.events().len(), "Scenario applied");

    let summary = session.summarize();
    let report = ScenarioReport {
        session_id: session.id().to_string(),
        display: SummaryDisplay::from_summary(summary.as_ref()),
        summary,
        events: session.events().to_vec(),
        nodes: node_list(session.events()),
        chart: ChartProjector::new(chart).project_session(&session),
    };

    info!(
        session_id = %report.session_id,
        price_model = %engine.price_model(),
        "Scenario completed"
    );
    Ok(report)
}
