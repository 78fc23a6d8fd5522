//! 노드(이벤트) 요청과 기록.
//!
//! - `EventRequest` - 가격 변동률과 매도/매수 지시의 한 쌍
//! - `EventRecord` - 적용 직후 상태 스냅샷을 담은 불변 기록

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimResult;
use crate::types::{decimal_from_f64, Money, Percent, Shares, HUNDRED};

/// 거래 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    /// 보유 수량 일부 매도
    Sell,
    /// 금액 기준 추가 매수
    Buy,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Sell => write!(f, "sell"),
            TradeType::Buy => write!(f, "buy"),
        }
    }
}

impl std::str::FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sell" => Ok(Self::Sell),
            "buy" => Ok(Self::Buy),
            _ => Err(format!("Unknown trade type: {}", s)),
        }
    }
}

/// 거래 지시.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trade", rename_all = "snake_case")]
pub enum TradeAction {
    /// 현재 보유 수량의 `percent`% 매도 (0~100)
    Sell { percent: Percent },
    /// `amount` 금액만큼 매수
    Buy { amount: Money },
}

impl TradeAction {
    pub fn trade_type(&self) -> TradeType {
        match self {
            TradeAction::Sell { .. } => TradeType::Sell,
            TradeAction::Buy { .. } => TradeType::Buy,
        }
    }
}

/// 노드 추가 요청.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    /// 선언된 가격 변동률 (%)
    pub change_percent: Percent,
    /// 거래 지시
    #[serde(flatten)]
    pub action: TradeAction,
}

impl EventRequest {
    /// 매도 요청을 생성합니다.
    pub fn sell(change_percent: Percent, percent: Percent) -> Self {
        Self {
            change_percent,
            action: TradeAction::Sell { percent },
        }
    }

    /// 매수 요청을 생성합니다.
    pub fn buy(change_percent: Percent, amount: Money) -> Self {
        Self {
            change_percent,
            action: TradeAction::Buy { amount },
        }
    }

    /// 외부 입력(f64)으로부터 요청을 생성합니다.
    ///
    /// `value`는 매도일 때 비율, 매수일 때 금액입니다. 유한하지 않은 값은
    /// `InvalidInput`으로 거부됩니다.
    pub fn from_f64(change_percent: f64, trade_type: TradeType, value: f64) -> SimResult<Self> {
        let change_percent = decimal_from_f64(change_percent, "가격 변동률")?;
        let request = match trade_type {
            TradeType::Sell => Self::sell(change_percent, decimal_from_f64(value, "매도 비율")?),
            TradeType::Buy => Self::buy(change_percent, decimal_from_f64(value, "매수 금액")?),
        };
        Ok(request)
    }

    pub fn trade_type(&self) -> TradeType {
        self.action.trade_type()
    }
}

/// 노드 적용 결과 기록 (append-only 로그의 한 항목).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 순번 (로그 인덱스 + 1)
    pub sequence: u32,
    /// 선언된 가격 변동률
    pub change_percent: Percent,
    /// 거래 방향
    pub trade_type: TradeType,
    /// 매도 비율 (매수는 0)
    pub trade_percent: Percent,
    /// 매도 대금 또는 매수 금액
    pub trade_value: Money,
    /// 적용 후 가격
    pub price: Money,
    /// 적용 후 보유 수량
    pub shares: Shares,
    /// 적용 후 보유 비율 (%)
    pub holding_percent: Percent,
    /// 적용 후 보유 평가액
    pub holding_value: Money,
    /// 적용 후 초기 가치 대비 가격 변동률 (%)
    pub price_change_percent: Percent,
}

impl EventRecord {
    /// 차트용 가격 비율 (초기 가치 대비, 100 + 누적 변동률).
    pub fn price_percent(&self) -> Percent {
        HUNDRED.saturating_add(self.price_change_percent)
    }

    pub fn is_sell(&self) -> bool {
        self.trade_type == TradeType::Sell
    }
}

/// 비율 입력이 매수에서 의미가 없을 때 사용하는 값.
pub(crate) const NO_TRADE_PERCENT: Decimal = Decimal::ZERO;
