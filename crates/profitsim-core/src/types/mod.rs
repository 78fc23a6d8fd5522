//! 시뮬레이터 전반에서 사용되는 공통 타입.

mod decimal;

pub(crate) use decimal::overflow;
pub use decimal::{
    decimal_from_f64, DecimalExt, Money, Percent, Shares, HUNDRED, MONEY_DP, SHARES_DP,
};
