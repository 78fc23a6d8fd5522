//! 터미널 출력 렌더링.

use profitsim_chart::{
    report::EMPTY_NODE_LIST, ChartProjection, NodeListEntry, SummaryDisplay, Tone,
};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {}. Supported: text, json", s)),
        }
    }
}

fn tone_mark(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "▲",
        Tone::Negative => "▼",
        Tone::Neutral => " ",
    }
}

/// 요약 패널.
pub fn render_summary(display: &SummaryDisplay) -> String {
    let mut lines = vec!["📊 요약".to_string(), RULE.to_string()];
    for (label, value) in display.rows() {
        lines.push(format!("  {:<8} {} {}", label, tone_mark(value.tone), value.text));
    }
    lines.join("\n")
}

/// 노드 목록 (최신 순).
pub fn render_nodes(entries: &[NodeListEntry]) -> String {
    let mut lines = vec!["📋 노드".to_string(), RULE.to_string()];
    if entries.is_empty() {
        lines.push(format!("  {}", EMPTY_NODE_LIST));
    }
    for entry in entries {
        lines.push(format!("  {} {}", tone_mark(entry.title_tone), entry.title));
        lines.push(format!("      {}", entry.detail));
        lines.push(format!("      {}", entry.result));
    }
    lines.join("\n")
}

/// 차트 투영 결과의 텍스트 요약.
pub fn render_chart(chart: &ChartProjection) -> String {
    let mut lines = vec![
        format!("📈 차트 ({}×{})", chart.width, chart.height),
        RULE.to_string(),
    ];

    if let Some(empty) = chart.empty {
        lines.push(format!("  {}", empty.message()));
    }
    if chart.markers.is_empty() {
        return lines.join("\n");
    }

    lines.push(format!(
        "  세로축 {}% ~ {}%",
        chart.vertical_domain.min, chart.vertical_domain.max
    ));
    if let Some(domain) = chart.horizontal_domain {
        lines.push(format!("  가로축 {}% ~ {}%", domain.min, domain.max));
    }
    let ticks: Vec<&str> = chart.y_ticks.iter().map(|t| t.label.as_str()).collect();
    lines.push(format!("  눈금 {}", ticks.join(" / ")));

    for marker in &chart.markers {
        lines.push(format!(
            "  #{:<3} ({:>7.1}, {:>6.1})  가격 {}%  보유 {}",
            marker.sequence,
            marker.position.x,
            marker.position.y,
            marker.price_percent,
            marker.label
        ));
    }
    if !chart.polyline.is_empty() {
        lines.push(format!("  points=\"{}\"", chart.polyline_attr()));
    }
    lines.join("\n")
}
