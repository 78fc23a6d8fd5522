//! 포지션 회계 엔진.
//!
//! 현재 상태와 노드 요청을 받아 새 상태와 기록을 돌려주는 순수 상태 전이입니다.
//! 실패한 요청은 입력 상태를 전혀 바꾸지 않습니다. 세션 단위의 소유/로그 관리는
//! [`Session`]이 담당합니다.
//!
//! # 사용 예시
//!
//! ```
//! use profitsim_core::{EventRequest, PortfolioEngine};
//! use rust_decimal_macros::dec;
//!
//! let engine = PortfolioEngine::default();
//! let state = engine.initialize(dec!(1000)).unwrap();
//! let (state, record) = engine
//!     .apply_event(&state, 1, &EventRequest::sell(dec!(10), dec!(50)))
//!     .unwrap();
//!
//! assert_eq!(record.trade_value, dec!(550));
//! assert_eq!(state.realized_profit, dec!(50));
//! ```

mod session;

pub use session::Session;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::domain::{
    EventRecord, EventRequest, PositionState, SummaryView, TradeAction, NO_TRADE_PERCENT,
};
use crate::error::{SimError, SimResult};
use crate::types::{overflow, DecimalExt, Money, HUNDRED};

/// 노드마다 가격을 다시 계산하는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceModel {
    /// 매 노드가 초기 가치 대비 절대 변동률을 선언 (`initial × (1 + c/100)`)
    #[default]
    AbsoluteOffset,
    /// 직전 가격에 변동률을 누적 적용 (`price × (1 + c/100)`)
    Compounding,
}

impl fmt::Display for PriceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceModel::AbsoluteOffset => write!(f, "absolute_offset"),
            PriceModel::Compounding => write!(f, "compounding"),
        }
    }
}

impl std::str::FromStr for PriceModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "absolute_offset" | "absolute" => Ok(Self::AbsoluteOffset),
            "compounding" | "compound" => Ok(Self::Compounding),
            _ => Err(format!("Unknown price model: {}", s)),
        }
    }
}

/// 포지션 회계 엔진.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortfolioEngine {
    price_model: PriceModel,
}

impl PortfolioEngine {
    pub fn new(price_model: PriceModel) -> Self {
        Self { price_model }
    }

    pub fn price_model(&self) -> PriceModel {
        self.price_model
    }

    /// 초기 가치로 포지션을 엽니다.
    ///
    /// `value`는 0보다 커야 합니다.
    pub fn initialize(&self, value: Money) -> SimResult<PositionState> {
        if !value.is_strictly_positive() {
            return Err(SimError::InvalidInput(format!(
                "초기 매수 가치는 0보다 커야 합니다 ({})",
                value
            )));
        }
        Ok(PositionState::opened_with(value))
    }

    /// 노드 하나를 적용해 새 상태와 기록을 계산합니다.
    ///
    /// # 매개변수
    ///
    /// * `state` - 현재 상태 (변경되지 않음)
    /// * `sequence` - 새 기록의 순번 (로그 길이 + 1)
    /// * `request` - 가격 변동률과 거래 지시
    ///
    /// # 에러
    ///
    /// * `NotInitialized` - 초기화 전
    /// * `OutOfRange` - 매도 비율이 0~100 밖
    /// * `NoHoldings` - 보유 수량 없이 매도
    /// * `InvalidInput` - 매수 금액이 0 이하, 새 가격이 음수, 가격이 0일 때의 매수,
    ///   또는 상태나 요약 수치의 숫자 범위 초과
    pub fn apply_event(
        &self,
        state: &PositionState,
        sequence: u32,
        request: &EventRequest,
    ) -> SimResult<(PositionState, EventRecord)> {
        if !state.is_initialized() {
            return Err(SimError::NotInitialized);
        }
        validate_action(state, &request.action)?;

        let change_percent = request.change_percent;
        let multiplier = change_percent
            .percent_to_multiplier()
            .ok_or_else(|| overflow("가격"))?;
        let base_price = match self.price_model {
            PriceModel::AbsoluteOffset => state.initial_value,
            PriceModel::Compounding => state.price,
        };

        let mut next = *state;
        next.price = mul(base_price, multiplier, "가격")?;
        if next.price.is_strictly_negative() {
            return Err(SimError::InvalidInput(format!(
                "가격이 0보다 작아지는 변동률입니다 ({}%)",
                change_percent
            )));
        }
        next.cumulative_change_percent = match self.price_model {
            PriceModel::AbsoluteOffset => change_percent,
            PriceModel::Compounding => {
                let ratio = div(next.price, next.initial_value, "누적 변동률")?;
                sub(mul(ratio, HUNDRED, "누적 변동률")?, HUNDRED, "누적 변동률")?
            }
        };

        let (trade_percent, trade_value) = match request.action {
            TradeAction::Sell { percent } => (percent, apply_sell(&mut next, percent)?),
            TradeAction::Buy { amount } => (NO_TRADE_PERCENT, apply_buy(&mut next, amount)?),
        };

        let holding_ratio = div(next.shares, next.initial_shares, "보유 비율")?;
        let holding_percent = mul(holding_ratio, HUNDRED, "보유 비율")?;
        let holding_value = mul(next.shares, next.price, "보유 평가액")?;

        // 이후 요약과 차트 계산이 범위 안에 머무는 상태만 받아들임
        SummaryView::try_from_state(&next)?;
        add(HUNDRED, next.cumulative_change_percent, "가격 비율")?;

        let record = EventRecord {
            sequence,
            change_percent,
            trade_type: request.trade_type(),
            trade_percent,
            trade_value,
            price: next.price,
            shares: next.shares,
            holding_percent,
            holding_value,
            price_change_percent: next.cumulative_change_percent,
        };

        debug!(
            sequence,
            trade = %record.trade_type,
            price = %record.price,
            shares = %record.shares,
            trade_value = %record.trade_value,
            "Event applied"
        );

        Ok((next, record))
    }

    /// 요약 수치를 계산합니다. 초기화 전이면 `None`입니다.
    pub fn summarize(&self, state: &PositionState) -> Option<SummaryView> {
        SummaryView::from_state(state)
    }

    /// 초기화되지 않은 센티널 상태를 반환합니다.
    pub fn reset(&self) -> PositionState {
        PositionState::uninitialized()
    }
}

/// 상태를 바꾸기 전에 거래 지시를 검증합니다.
fn validate_action(state: &PositionState, action: &TradeAction) -> SimResult<()> {
    match *action {
        TradeAction::Sell { percent } => {
            if percent < Decimal::ZERO || percent > HUNDRED {
                return Err(SimError::OutOfRange(format!(
                    "매도 비율은 0에서 100 사이여야 합니다 ({})",
                    percent
                )));
            }
            if !state.has_holdings() {
                return Err(SimError::NoHoldings);
            }
        }
        TradeAction::Buy { amount } => {
            if !amount.is_strictly_positive() {
                return Err(SimError::InvalidInput(format!(
                    "매수 금액은 0보다 커야 합니다 ({})",
                    amount
                )));
            }
        }
    }
    Ok(())
}

/// 매도를 적용하고 매도 대금을 반환합니다.
fn apply_sell(next: &mut PositionState, percent: Decimal) -> SimResult<Money> {
    let ratio = div(percent, HUNDRED, "매도 수량")?;
    let sell_shares = mul(next.shares, ratio, "매도 수량")?.min(next.shares);
    let proceeds = mul(sell_shares, next.price, "매도 대금")?;

    let cost_portion = if next.shares.is_zero() {
        Decimal::ZERO
    } else {
        let fraction = div(sell_shares, next.shares, "매도 원가")?;
        mul(next.cost_basis_total, fraction, "매도 원가")?.min(next.cost_basis_total)
    };

    let profit = sub(proceeds, cost_portion, "실현 손익")?;
    next.realized_profit = add(next.realized_profit, profit, "실현 손익")?;
    next.cost_basis_total -= cost_portion;
    next.shares -= sell_shares;
    next.realized_proceeds = add(next.realized_proceeds, proceeds, "누적 매도 대금")?;

    Ok(proceeds)
}

/// 매수를 적용하고 매수 금액을 반환합니다.
fn apply_buy(next: &mut PositionState, amount: Money) -> SimResult<Money> {
    if !next.price.is_strictly_positive() {
        return Err(SimError::InvalidInput(format!(
            "가격이 0 이하일 때는 매수할 수 없습니다 ({})",
            next.price
        )));
    }

    let buy_shares = div(amount, next.price, "매수 수량")?;
    next.shares = add(next.shares, buy_shares, "보유 수량")?;
    next.cost_basis_total = add(next.cost_basis_total, amount, "원가")?;

    Ok(amount)
}

fn mul(a: Decimal, b: Decimal, op: &str) -> SimResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(op))
}

fn div(a: Decimal, b: Decimal, op: &str) -> SimResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(op))
}

fn add(a: Decimal, b: Decimal, op: &str) -> SimResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(op))
}

fn sub(a: Decimal, b: Decimal, op: &str) -> SimResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeType;
    use rust_decimal_macros::dec;

    fn opened(value: Decimal) -> PositionState {
        PortfolioEngine::default().initialize(value).unwrap()
    }

    #[test]
    fn test_initialize_rejects_non_positive() {
        let engine = PortfolioEngine::default();
        assert!(matches!(
            engine.initialize(Decimal::ZERO),
            Err(SimError::InvalidInput(_))
        ));
        assert!(matches!(
            engine.initialize(dec!(-10)),
            Err(SimError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sell_half_at_ten_percent() {
        let engine = PortfolioEngine::default();
        let state = opened(dec!(1000));

        let (next, record) = engine
            .apply_event(&state, 1, &EventRequest::sell(dec!(10), dec!(50)))
            .unwrap();

        assert_eq!(next.price, dec!(1100));
        assert_eq!(next.shares, dec!(0.5));
        assert_eq!(next.cost_basis_total, dec!(500));
        assert_eq!(next.realized_profit, dec!(50));
        assert_eq!(next.realized_proceeds, dec!(550));
        assert_eq!(record.trade_value, dec!(550));
        assert_eq!(record.trade_percent, dec!(50));
        assert_eq!(record.holding_percent, dec!(50));
        assert_eq!(record.holding_value, dec!(550));
        assert_eq!(record.price_percent(), dec!(110));
    }

    #[test]
    fn test_buy_keeps_realized_figures() {
        let engine = PortfolioEngine::default();
        let state = opened(dec!(1000));

        let (next, record) = engine
            .apply_event(&state, 1, &EventRequest::buy(dec!(-5), dec!(190)))
            .unwrap();

        assert_eq!(next.price, dec!(950));
        assert_eq!(next.shares, dec!(1.2));
        assert_eq!(next.cost_basis_total, dec!(1190));
        assert_eq!(next.realized_profit, Decimal::ZERO);
        assert_eq!(next.realized_proceeds, Decimal::ZERO);
        assert_eq!(record.trade_type, TradeType::Buy);
        assert_eq!(record.trade_percent, Decimal::ZERO);
        assert_eq!(record.trade_value, dec!(190));
    }

    #[test]
    fn test_absolute_offset_does_not_compound() {
        let engine = PortfolioEngine::new(PriceModel::AbsoluteOffset);
        let state = opened(dec!(1000));

        let (state, _) = engine
            .apply_event(&state, 1, &EventRequest::sell(dec!(10), dec!(0)))
            .unwrap();
        let (state, _) = engine
            .apply_event(&state, 2, &EventRequest::sell(dec!(10), dec!(0)))
            .unwrap();

        assert_eq!(state.price, dec!(1100));
    }

    #[test]
    fn test_compounding_price_model() {
        let engine = PortfolioEngine::new(PriceModel::Compounding);
        let state = opened(dec!(1000));

        let (state, _) = engine
            .apply_event(&state, 1, &EventRequest::sell(dec!(10), dec!(0)))
            .unwrap();
        let (state, record) = engine
            .apply_event(&state, 2, &EventRequest::sell(dec!(10), dec!(0)))
            .unwrap();

        assert_eq!(state.price, dec!(1210));
        // 초기 가치 대비 누적 변동률
        assert_eq!(state.cumulative_change_percent, dec!(21));
        assert_eq!(record.change_percent, dec!(10));
        assert_eq!(record.price_percent(), dec!(121));
    }

    #[test]
    fn test_full_liquidation_is_exact() {
        let engine = PortfolioEngine::default();
        let state = opened(dec!(1000));
        let (state, _) = engine
            .apply_event(&state, 1, &EventRequest::buy(dec!(-5), dec!(200)))
            .unwrap();

        let (state, record) = engine
            .apply_event(&state, 2, &EventRequest::sell(dec!(3), dec!(100)))
            .unwrap();

        assert_eq!(state.shares, Decimal::ZERO);
        assert_eq!(state.cost_basis_total, Decimal::ZERO);
        assert_eq!(record.holding_value, Decimal::ZERO);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let engine = PortfolioEngine::default();
        let state = opened(dec!(1000));

        let result = engine.apply_event(&state, 1, &EventRequest::sell(dec!(10), dec!(150)));
        assert!(matches!(result, Err(SimError::OutOfRange(_))));

        let result = engine.apply_event(&state, 1, &EventRequest::sell(dec!(10), dec!(-1)));
        assert!(matches!(result, Err(SimError::OutOfRange(_))));

        let result = engine.apply_event(&state, 1, &EventRequest::buy(dec!(10), Decimal::ZERO));
        assert!(matches!(result, Err(SimError::InvalidInput(_))));

        let result = engine.apply_event(&state, 1, &EventRequest::buy(dec!(-100), dec!(10)));
        assert!(matches!(result, Err(SimError::InvalidInput(_))));

        assert_eq!(state, opened(dec!(1000)));
    }

    #[test]
    fn test_price_below_zero_is_rejected() {
        let engine = PortfolioEngine::default();
        let state = opened(dec!(1000));

        let result = engine.apply_event(&state, 1, &EventRequest::sell(dec!(-150), dec!(50)));
        assert!(matches!(result, Err(SimError::InvalidInput(_))));

        let request = EventRequest::sell(-Decimal::MAX, Decimal::ZERO);
        let result = engine.apply_event(&state, 1, &request);
        assert!(matches!(result, Err(SimError::InvalidInput(_))));

        // -100%는 가격 0으로 매도 가능 (대금 0)
        let (next, record) = engine
            .apply_event(&state, 1, &EventRequest::sell(dec!(-100), dec!(50)))
            .unwrap();
        assert_eq!(record.trade_value, Decimal::ZERO);
        assert_eq!(next.realized_proceeds, Decimal::ZERO);
        assert_eq!(next.realized_profit, dec!(-500));
    }

    #[test]
    fn test_overflowing_summary_is_rejected() {
        let engine = PortfolioEngine::default();
        let state = engine
            .initialize(dec!(50000000000000000000000000000))
            .unwrap();
        let (state, _) = engine
            .apply_event(&state, 1, &EventRequest::sell(dec!(0), dec!(50)))
            .unwrap();

        // 총 가치가 Decimal 범위를 넘는 매수
        let result = engine.apply_event(
            &state,
            2,
            &EventRequest::buy(dec!(0), dec!(40000000000000000000000000000)),
        );
        assert!(matches!(result, Err(SimError::InvalidInput(_))));
        assert!(engine.summarize(&state).is_some());
    }

    #[test]
    fn test_not_initialized() {
        let engine = PortfolioEngine::default();
        let result = engine.apply_event(
            &PositionState::uninitialized(),
            1,
            &EventRequest::sell(dec!(0), dec!(10)),
        );
        assert!(matches!(result, Err(SimError::NotInitialized)));
        assert!(engine.summarize(&PositionState::uninitialized()).is_none());
    }

    #[test]
    fn test_sell_without_holdings() {
        let engine = PortfolioEngine::default();
        let state = opened(dec!(1000));
        let (state, _) = engine
            .apply_event(&state, 1, &EventRequest::sell(dec!(0), dec!(100)))
            .unwrap();

        let result = engine.apply_event(&state, 2, &EventRequest::sell(dec!(0), dec!(10)));
        assert!(matches!(result, Err(SimError::NoHoldings)));

        // 전량 매도 후에도 매수는 가능
        let (state, _) = engine
            .apply_event(&state, 2, &EventRequest::buy(dec!(0), dec!(500)))
            .unwrap();
        assert_eq!(state.shares, dec!(0.5));
    }

    #[test]
    fn test_price_model_from_str() {
        assert_eq!(
            "absolute_offset".parse::<PriceModel>().unwrap(),
            PriceModel::AbsoluteOffset
        );
        assert_eq!(
            "Compounding".parse::<PriceModel>().unwrap(),
            PriceModel::Compounding
        );
        assert!("linear".parse::<PriceModel>().is_err());
    }
}
