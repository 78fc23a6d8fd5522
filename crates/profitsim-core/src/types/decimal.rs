//! 정밀한 금액 계산을 위한 Decimal 유틸리티.
//!
//! 엔진 내부 연산은 반올림 없이 `Decimal`로 수행합니다. 반올림은 표시 계층에서만
//! [`DecimalExt::round_money`], [`DecimalExt::round_shares`]로 적용합니다.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{SimError, SimResult};

/// 금액 타입.
pub type Money = Decimal;

/// 주식 수량 타입.
pub type Shares = Decimal;

/// 퍼센트 타입 (100 기준, 10 = 10%).
pub type Percent = Decimal;

/// 퍼센트 변환 기준값.
pub const HUNDRED: Decimal = dec!(100);

/// 금액 표시 소수점 자릿수.
pub const MONEY_DP: u32 = 2;

/// 수량 표시 소수점 자릿수.
pub const SHARES_DP: u32 = 4;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다 (0은 제외).
    fn is_strictly_positive(&self) -> bool;

    /// 0보다 작은지 확인합니다 (0은 제외).
    fn is_strictly_negative(&self) -> bool;

    /// 금액 표시용으로 소수점 2자리 반올림합니다.
    fn round_money(&self) -> Decimal;

    /// 수량 표시용으로 소수점 4자리 반올림합니다.
    fn round_shares(&self) -> Decimal;

    /// 퍼센트(100 기준)를 비율 승수로 변환합니다 (10 → 1.1).
    fn percent_to_multiplier(&self) -> Option<Decimal>;
}

impl DecimalExt for Decimal {
    fn is_strictly_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn is_strictly_negative(&self) -> bool {
        *self < Decimal::ZERO
    }

    fn round_money(&self) -> Decimal {
        self.round_dp_with_strategy(MONEY_DP, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn round_shares(&self) -> Decimal {
        self.round_dp_with_strategy(SHARES_DP, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn percent_to_multiplier(&self) -> Option<Decimal> {
        self.checked_div(HUNDRED)
            .and_then(|ratio| Decimal::ONE.checked_add(ratio))
    }
}

/// 외부 입력(f64)을 Decimal로 변환합니다.
///
/// NaN, 무한대, 또는 Decimal 범위를 벗어난 값은 `InvalidInput`입니다.
pub fn decimal_from_f64(value: f64, field: &str) -> SimResult<Decimal> {
    if !value.is_finite() {
        return Err(SimError::InvalidInput(format!(
            "{}: 유한한 숫자가 아닙니다 ({})",
            field, value
        )));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        SimError::InvalidInput(format!("{}: 표현할 수 없는 값입니다 ({})", field, value))
    })
}

/// 오버플로를 `InvalidInput`으로 바꿔 주는 검사 연산 헬퍼.
pub(crate) fn overflow(op: &str) -> SimError {
    SimError::InvalidInput(format!("{} 계산 중 숫자 범위를 초과했습니다", op))
}
