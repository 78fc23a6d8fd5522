//! 포지션 요약 수치.

use serde::{Deserialize, Serialize};

use crate::domain::PositionState;
use crate::error::SimResult;
use crate::types::{overflow, Money, Percent};

/// 화면 표시용 요약 수치.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    /// 보유 평가액 + 누적 매도 대금
    pub total_value: Money,
    /// 실현 + 미실현 손익
    pub total_profit: Money,
    /// 실현 손익
    pub realized_profit: Money,
    /// 보유 평가액 - 원가
    pub unrealized_profit: Money,
    /// 보유 평가액
    pub holding_value: Money,
    /// 초기 수량 대비 보유 비율 (%)
    pub holding_percent: Percent,
    /// 최근 선언된 가격 변동률 (%)
    pub cumulative_change_percent: Percent,
    /// 현재 가격
    pub price: Money,
}

impl SummaryView {
    /// 상태로부터 요약을 계산합니다. 초기화 전이면 `None`입니다.
    ///
    /// 엔진은 요약이 범위를 넘는 노드를 거부하므로, 엔진이 만든 상태에서는
    /// 초기화 이후 항상 `Some`입니다.
    pub fn from_state(state: &PositionState) -> Option<Self> {
        Self::try_from_state(state).ok().flatten()
    }

    /// 검사 연산으로 요약을 계산합니다. 범위를 넘으면 `InvalidInput`입니다.
    pub fn try_from_state(state: &PositionState) -> SimResult<Option<Self>> {
        if !state.is_initialized() {
            return Ok(None);
        }

        let holding_value = state
            .holding_value()
            .ok_or_else(|| overflow("보유 평가액"))?;
        let holding_percent = state
            .holding_percent()
            .ok_or_else(|| overflow("보유 비율"))?;
        let unrealized_profit = holding_value
            .checked_sub(state.cost_basis_total)
            .ok_or_else(|| overflow("미실현 손익"))?;
        let total_value = holding_value
            .checked_add(state.realized_proceeds)
            .ok_or_else(|| overflow("총 가치"))?;
        let total_profit = state
            .realized_profit
            .checked_add(unrealized_profit)
            .ok_or_else(|| overflow("총 손익"))?;

        Ok(Some(Self {
            total_value,
            total_profit,
            realized_profit: state.realized_profit,
            unrealized_profit,
            holding_value,
            holding_percent,
            cumulative_change_percent: state.cumulative_change_percent,
            price: state.price,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_uninitialized_has_no_summary() {
        let state = PositionState::uninitialized();
        assert_eq!(SummaryView::from_state(&state), None);
        assert!(matches!(SummaryView::try_from_state(&state), Ok(None)));
    }

    #[test]
    fn test_overflowing_totals_are_reported() {
        let state = PositionState {
            realized_proceeds: Decimal::MAX,
            ..PositionState::opened_with(dec!(1000))
        };

        assert!(matches!(
            SummaryView::try_from_state(&state),
            Err(SimError::InvalidInput(_))
        ));
        assert_eq!(SummaryView::from_state(&state), None);
    }
}
