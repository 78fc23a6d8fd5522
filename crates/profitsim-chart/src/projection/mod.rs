//! 차트 투영 모듈
//!
//! 노드 로그를 고정된 논리 캔버스 위의 좌표와 라벨로 변환합니다. 그리기는
//! 표시 계층의 몫이며, 이 모듈은 순수한 데이터 → 기하 변환만 수행합니다.
//!
//! # 축
//!
//! - 세로축: 가격 비율(100 + 변동률). 도메인은 항상 0과 120을 포함하며 위로 갈수록 큰 값
//! - 가로축: [`AxisPolicy`]에 따라 노드 순번 등간격 또는 보유 비율 선형 축
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let projector = ChartProjector::new(ChartConfig::default());
//! let chart = projector.project_session(&session);
//!
//! for point in &chart.polyline {
//!     println!("{},{}", point.x, point.y);
//! }
//! ```

pub mod scale;
pub mod series;

pub use scale::{Domain, LinearScale};
pub use series::{build_series, SeriesPoint};

use profitsim_core::{AxisPolicy, ChartConfig, EventRecord, Session};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::report::format_fixed;

/// 세로축 하한 고정점.
pub const PRICE_FLOOR: Decimal = dec!(0);
/// 세로축 상한 고정점.
pub const PRICE_CEILING: Decimal = dec!(120);
/// 보유 비율 가로축 하한 고정점.
pub const HOLDING_FLOOR: Decimal = dec!(0);
/// 보유 비율 가로축 상한 고정점.
pub const HOLDING_CEILING: Decimal = dec!(120);

/// 캔버스 좌표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 여백을 뺀 실제 플롯 영역.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_config(config: &ChartConfig) -> Self {
        let padding = config.padding;
        Self {
            left: padding.left,
            top: padding.top,
            width: (config.width - padding.left - padding.right).max(0.0),
            height: (config.height - padding.top - padding.bottom).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// 격자선 하나.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub from: CanvasPoint,
    pub to: CanvasPoint,
}

/// 축 눈금과 라벨.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// 도메인 값
    pub value: Decimal,
    /// 축 방향 캔버스 좌표 (세로축은 y, 가로축은 x)
    pub position: f64,
    /// 표시 라벨 (예: "120%")
    pub label: String,
}

/// 점 하나의 마커와 주석.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    /// 노드 순번 (초기 점은 0)
    pub sequence: u32,
    pub position: CanvasPoint,
    pub price_percent: Decimal,
    pub holding_percent: Decimal,
    /// 보유 비율 라벨 (예: "50.0%")
    pub label: String,
}

/// 폴리라인 대신 표시할 빈 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// 초기 가치 입력 전
    AwaitingInitialValue,
    /// 초기화됨, 노드 없음
    AwaitingEvents,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::AwaitingInitialValue => "초기 가치 입력 대기 중",
            EmptyState::AwaitingEvents => "초기화됨, 노드 추가 대기 중",
        }
    }
}

/// 투영 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartProjection {
    pub width: f64,
    pub height: f64,
    pub plot_area: PlotArea,
    pub axis_policy: AxisPolicy,
    /// 세로축(가격 비율) 도메인
    pub vertical_domain: Domain,
    /// 가로축 도메인 (`HoldingPercent` 정책일 때만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_domain: Option<Domain>,
    /// 모든 점을 잇는 선. 노드가 없으면 비어 있음
    pub polyline: Vec<CanvasPoint>,
    pub markers: Vec<PointMarker>,
    /// 세로축 눈금 (위에서 아래 순)
    pub y_ticks: Vec<AxisTick>,
    /// 가로축 눈금 (`HoldingPercent` 정책일 때만)
    pub x_ticks: Vec<AxisTick>,
    pub grid_lines: Vec<GridLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyState>,
}

impl ChartProjection {
    pub fn is_empty(&self) -> bool {
        self.empty.is_some()
    }

    /// SVG `points` 속성 형식의 폴리라인 문자열.
    pub fn polyline_attr(&self) -> String {
        self.polyline
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 노드 로그를 캔버스 좌표로 투영합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartProjector {
    config: ChartConfig,
}

impl ChartProjector {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// 세션 상태에 맞게 투영합니다. 초기화 전이면 점과 격자 없이 빈 상태만 표시합니다.
    pub fn project_session(&self, session: &Session) -> ChartProjection {
        if session.is_initialized() {
            self.project(session.events())
        } else {
            self.uninitialized()
        }
    }

    /// 초기화된 세션의 노드 로그를 투영합니다.
    pub fn project(&self, events: &[EventRecord]) -> ChartProjection {
        let series = build_series(events);
        let area = PlotArea::from_config(&self.config);
        let divisions = self.config.grid_divisions.max(1);

        let vertical_domain = Domain::anchored(
            series.iter().map(|p| p.price_percent),
            PRICE_FLOOR,
            PRICE_CEILING,
        );
        let y_scale = LinearScale::new(vertical_domain, area.bottom(), area.top);

        let mut grid_lines = Vec::new();
        let y_ticks = self.vertical_ticks(&area, vertical_domain, divisions, &mut grid_lines);

        let (positions, horizontal_domain, x_ticks) = match self.config.axis_policy {
            AxisPolicy::IndexSpaced => {
                let xs = index_positions(&area, series.len());
                for x in index_grid_positions(&area, series.len()) {
                    grid_lines.push(vertical_line(&area, x));
                }
                (xs, None, Vec::new())
            }
            AxisPolicy::HoldingPercent => {
                let domain = Domain::anchored(
                    series.iter().map(|p| p.holding_percent),
                    HOLDING_FLOOR,
                    HOLDING_CEILING,
                );
                let x_scale = LinearScale::new(domain, area.left, area.right());
                let xs: Vec<f64> = series.iter().map(|p| x_scale.map(p.holding_percent)).collect();
                let ticks: Vec<AxisTick> = domain
                    .divisions(divisions)
                    .into_iter()
                    .enumerate()
                    .map(|(i, value)| AxisTick {
                        value,
                        position: area.left + area.width / f64::from(divisions) * i as f64,
                        label: format!("{}%", format_fixed(value, 0)),
                    })
                    .collect();
                for tick in &ticks {
                    grid_lines.push(vertical_line(&area, tick.position));
                }
                (xs, Some(domain), ticks)
            }
        };

        let markers: Vec<PointMarker> = series
            .iter()
            .zip(positions)
            .map(|(point, x)| PointMarker {
                sequence: point.sequence,
                position: CanvasPoint::new(x, y_scale.map(point.price_percent)),
                price_percent: point.price_percent,
                holding_percent: point.holding_percent,
                label: format!("{}%", format_fixed(point.holding_percent, 1)),
            })
            .collect();

        let (polyline, empty) = if events.is_empty() {
            (Vec::new(), Some(EmptyState::AwaitingEvents))
        } else {
            (markers.iter().map(|m| m.position).collect(), None)
        };

        trace!(
            points = markers.len(),
            min = %vertical_domain.min,
            max = %vertical_domain.max,
            "Chart projected"
        );

        ChartProjection {
            width: self.config.width,
            height: self.config.height,
            plot_area: area,
            axis_policy: self.config.axis_policy,
            vertical_domain,
            horizontal_domain,
            polyline,
            markers,
            y_ticks,
            x_ticks,
            grid_lines,
            empty,
        }
    }

    fn uninitialized(&self) -> ChartProjection {
        ChartProjection {
            width: self.config.width,
            height: self.config.height,
            plot_area: PlotArea::from_config(&self.config),
            axis_policy: self.config.axis_policy,
            vertical_domain: Domain::new(PRICE_FLOOR, PRICE_CEILING),
            horizontal_domain: None,
            polyline: Vec::new(),
            markers: Vec::new(),
            y_ticks: Vec::new(),
            x_ticks: Vec::new(),
            grid_lines: Vec::new(),
            empty: Some(EmptyState::AwaitingInitialValue),
        }
    }

    /// 세로축 눈금을 위(최댓값)에서 아래(최솟값) 순으로 만들고 가로 격자선을 추가합니다.
    fn vertical_ticks(
        &self,
        area: &PlotArea,
        domain: Domain,
        divisions: u32,
        grid_lines: &mut Vec<GridLine>,
    ) -> Vec<AxisTick> {
        domain
            .divisions(divisions)
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, value)| {
                let y = area.top + area.height / f64::from(divisions) * i as f64;
                grid_lines.push(GridLine {
                    from: CanvasPoint::new(area.left, y),
                    to: CanvasPoint::new(area.right(), y),
                });
                AxisTick {
                    value,
                    position: y,
                    label: format!("{}%", format_fixed(value, 0)),
                }
            })
            .collect()
    }
}

/// 등간격 배치에서 `count`개 점의 x 좌표.
fn index_positions(area: &PlotArea, count: usize) -> Vec<f64> {
    let step = index_step(area, count);
    (0..count).map(|i| area.left + step * i as f64).collect()
}

/// 등간격 배치의 세로 격자선 x 좌표. 점이 하나여도 양 끝 두 줄을 그립니다.
fn index_grid_positions(area: &PlotArea, count: usize) -> Vec<f64> {
    let steps = count.saturating_sub(1).max(1);
    let step = index_step(area, count);
    (0..=steps).map(|i| area.left + step * i as f64).collect()
}

fn index_step(area: &PlotArea, count: usize) -> f64 {
    let steps = count.saturating_sub(1).max(1);
    area.width / steps as f64
}

fn vertical_line(area: &PlotArea, x: f64) -> GridLine {
    GridLine {
        from: CanvasPoint::new(x, area.top),
        to: CanvasPoint::new(x, area.bottom()),
    }
}
