//! 노드 로그를 차트 입력 시리즈로 변환합니다.

use profitsim_core::{EventRecord, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 차트 시리즈의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 노드 순번 (초기 점은 0)
    pub sequence: u32,
    /// 100 + 가격 변동률
    pub price_percent: Decimal,
    /// 초기 수량 대비 보유 비율
    pub holding_percent: Decimal,
}

impl SeriesPoint {
    /// 초기화 시점의 암묵적 첫 점.
    pub fn initial() -> Self {
        Self {
            sequence: 0,
            price_percent: HUNDRED,
            holding_percent: HUNDRED,
        }
    }
}

impl From<&EventRecord> for SeriesPoint {
    fn from(record: &EventRecord) -> Self {
        Self {
            sequence: record.sequence,
            price_percent: record.price_percent(),
            holding_percent: record.holding_percent,
        }
    }
}

/// `[초기 점] ++ 노드 기록` 시리즈를 만듭니다.
pub fn build_series(events: &[EventRecord]) -> Vec<SeriesPoint> {
    std::iter::once(SeriesPoint::initial())
        .chain(events.iter().map(SeriesPoint::from))
        .collect()
}
