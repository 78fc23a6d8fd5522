//! 포지션 시뮬레이션 도메인 모델.

mod event;
mod position;
mod summary;

pub(crate) use event::NO_TRADE_PERCENT;
pub use event::{EventRecord, EventRequest, TradeAction, TradeType};
pub use position::PositionState;
pub use summary::SummaryView;
