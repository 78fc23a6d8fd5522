//! # Profitsim Chart
//!
//! 노드 로그를 화면에 옮기기 위한 순수 변환 계층입니다.
//!
//! - [`projection`]: 고정 논리 캔버스 위의 폴리라인, 마커, 눈금, 격자선
//! - [`report`]: 요약 수치와 노드 목록의 표시 문자열

pub mod projection;
pub mod report;

pub use projection::{
    AxisTick, CanvasPoint, ChartProjection, ChartProjector, Domain, EmptyState, GridLine,
    LinearScale, PlotArea, PointMarker, SeriesPoint,
};
pub use report::{
    format_money, format_percent, format_shares, format_signed_money, format_signed_percent,
    node_list, DisplayValue, NodeListEntry, SummaryDisplay, Tone,
};
