//! 포지션 상태.
//!
//! 세션이 소유하는 단일 포지션의 현재 상태를 정의합니다. 원가는 개별 로트가 아닌
//! 하나의 가중 평균 풀로 관리됩니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Shares, HUNDRED};

/// 단일 포지션의 누적 상태.
///
/// `Default`는 초기화되지 않은 센티널 상태입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionState {
    /// 초기화 여부 (false = 센티널)
    pub initialized: bool,
    /// 초기화 시 투입한 가치 (세션 동안 고정)
    pub initial_value: Money,
    /// 초기 주식 수 (보유 비율의 분모, 관례상 1)
    pub initial_shares: Shares,
    /// 현재 1주당 평가 가격
    pub price: Money,
    /// 현재 보유 수량
    pub shares: Shares,
    /// 보유 수량의 가중 평균 총 원가
    pub cost_basis_total: Money,
    /// 매도로 확정된 누적 손익
    pub realized_profit: Money,
    /// 매도로 받은 누적 현금
    pub realized_proceeds: Money,
    /// 가장 최근에 선언된 가격 변동률 (초기 가치 대비 절대 오프셋)
    pub cumulative_change_percent: Percent,
}

impl Default for PositionState {
    fn default() -> Self {
        Self {
            initialized: false,
            initial_value: Decimal::ZERO,
            initial_shares: Decimal::ONE,
            price: Decimal::ZERO,
            shares: Decimal::ZERO,
            cost_basis_total: Decimal::ZERO,
            realized_profit: Decimal::ZERO,
            realized_proceeds: Decimal::ZERO,
            cumulative_change_percent: Decimal::ZERO,
        }
    }
}

impl PositionState {
    /// 초기화되지 않은 센티널 상태를 반환합니다.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// 초기 가치로 새 포지션을 엽니다. 입력 검증은 엔진이 담당합니다.
    pub(crate) fn opened_with(value: Money) -> Self {
        Self {
            initialized: true,
            initial_value: value,
            initial_shares: Decimal::ONE,
            price: value,
            shares: Decimal::ONE,
            cost_basis_total: value,
            ..Self::default()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 보유 수량이 남아 있는지 확인합니다.
    pub fn has_holdings(&self) -> bool {
        self.shares > Decimal::ZERO
    }

    /// 현재 보유 평가액 (수량 × 가격). 범위를 넘으면 `None`.
    pub fn holding_value(&self) -> Option<Money> {
        self.shares.checked_mul(self.price)
    }

    /// 초기 수량 대비 현재 보유 비율 (%). 범위를 넘으면 `None`.
    pub fn holding_percent(&self) -> Option<Percent> {
        self.shares
            .checked_div(self.initial_shares)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
    }
}
