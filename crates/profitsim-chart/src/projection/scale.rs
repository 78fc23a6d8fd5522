//! 선형 스케일과 축 도메인.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 축 도메인 (데이터 값 범위).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub min: Decimal,
    pub max: Decimal,
}

impl Domain {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// 데이터 범위에 하한/상한 고정점을 포함시킨 도메인.
    ///
    /// `[min(floor, min(values)), max(ceiling, max(values))]`
    pub fn anchored<I>(values: I, floor: Decimal, ceiling: Decimal) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        values
            .into_iter()
            .fold(Self::new(floor, ceiling), |domain, value| {
                Self::new(domain.min.min(value), domain.max.max(value))
            })
    }

    /// 도메인 폭. 0이면 1로, 표현 범위를 넘으면 `Decimal::MAX`로 대체합니다.
    pub fn span(&self) -> Decimal {
        match self.max.checked_sub(self.min) {
            Some(span) if span.is_zero() => Decimal::ONE,
            Some(span) => span,
            None => Decimal::MAX,
        }
    }

    /// 구간을 `divisions`등분한 경계값 (min부터 max까지, `divisions + 1`개).
    ///
    /// 폭이 표현 범위를 넘어도 끝점은 정확히 min과 max입니다.
    pub fn divisions(&self, divisions: u32) -> Vec<Decimal> {
        let divisions = divisions.max(1);
        let count = Decimal::from(divisions);
        let step = self.max / count - self.min / count;
        (0..=divisions)
            .map(|i| {
                if i == divisions {
                    return self.max;
                }
                step.checked_mul(Decimal::from(i))
                    .and_then(|offset| self.min.checked_add(offset))
                    .map_or(self.max, |value| value.min(self.max))
            })
            .collect()
    }
}

/// 도메인을 캔버스 좌표 구간으로 옮기는 선형 스케일.
///
/// `range_start`가 도메인 최솟값에 대응합니다. 세로축처럼 반전이 필요하면
/// `range_start > range_end`로 만들면 됩니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Domain,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: Domain, range_start: f64, range_end: f64) -> Self {
        Self {
            domain,
            range_start,
            range_end,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// 값을 캔버스 좌표로 변환합니다.
    pub fn map(&self, value: Decimal) -> f64 {
        // 폭이 넘치면 span()이 포화되므로 정확한 계산을 시도하지 않음
        let exact = self
            .domain
            .max
            .checked_sub(self.domain.min)
            .and_then(|_| value.checked_sub(self.domain.min))
            .and_then(|offset| offset.checked_div(self.domain.span()))
            .and_then(|t| t.to_f64());
        let t = exact.unwrap_or_else(|| self.approximate_ratio(value));
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Decimal 연산이 범위를 넘을 때의 f64 근사.
    fn approximate_ratio(&self, value: Decimal) -> f64 {
        let min = self.domain.min.to_f64().unwrap_or(0.0);
        let max = self.domain.max.to_f64().unwrap_or(0.0);
        let value = value.to_f64().unwrap_or(0.0);
        let span = max - min;
        if span == 0.0 {
            0.0
        } else {
            (value - min) / span
        }
    }
}
