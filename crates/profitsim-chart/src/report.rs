//! 표시용 서식.
//!
//! 요약 수치와 노드 목록을 화면에 그대로 쓸 수 있는 문자열로 바꿉니다.
//! 엔진은 반올림하지 않으므로 모든 반올림은 여기서 한 번만 일어납니다.

use profitsim_core::{EventRecord, SummaryView, TradeType, MONEY_DP, SHARES_DP};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 요약을 사용할 수 없을 때의 자리 표시자.
pub const PLACEHOLDER: &str = "--";

/// 노드가 없을 때의 목록 메시지.
pub const EMPTY_NODE_LIST: &str = "노드가 없습니다";

/// 소수점 `dp`자리로 반올림한 고정 소수 문자열.
///
/// 반올림 결과가 0이면 부호를 붙이지 않습니다.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// 천 단위 구분자를 넣은 금액 (`1,234.50`).
pub fn format_money(value: Decimal) -> String {
    group_thousands(&format_fixed(value, MONEY_DP))
}

/// 부호를 붙인 금액 (`+50.00`, `-12.00`). 0은 부호 없음.
pub fn format_signed_money(value: Decimal) -> String {
    with_sign(format_money(value))
}

/// 백분율 (`12.34%`).
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_fixed(value, MONEY_DP))
}

/// 부호를 붙인 백분율 (`+10.00%`).
pub fn format_signed_percent(value: Decimal) -> String {
    with_sign(format_percent(value))
}

/// 소수점 4자리 수량.
pub fn format_shares(value: Decimal) -> String {
    format_fixed(value, SHARES_DP)
}

fn with_sign(text: String) -> String {
    if text.starts_with('-') || is_zero_text(&text) {
        text
    } else {
        format!("+{}", text)
    }
}

fn is_zero_text(text: &str) -> bool {
    text.chars().all(|c| matches!(c, '0' | '.' | ',' | '%'))
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// 부호 있는 수치의 색조.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Tone {
    /// 표시 정밀도로 반올림한 값 기준으로 분류합니다.
    pub fn of(value: Decimal) -> Self {
        let rounded = value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
        if rounded > Decimal::ZERO {
            Tone::Positive
        } else if rounded < Decimal::ZERO {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

/// 색조가 붙은 표시 문자열.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayValue {
    pub text: String,
    pub tone: Tone,
}

impl DisplayValue {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }

    pub fn placeholder() -> Self {
        Self::neutral(PLACEHOLDER)
    }

    fn signed_money(value: Decimal) -> Self {
        Self::new(format_signed_money(value), Tone::of(value))
    }

    fn signed_percent(value: Decimal) -> Self {
        Self::new(format_signed_percent(value), Tone::of(value))
    }
}

/// 요약 패널 표시값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDisplay {
    pub total_value: DisplayValue,
    pub total_profit: DisplayValue,
    pub realized_profit: DisplayValue,
    pub unrealized_profit: DisplayValue,
    pub price_change: DisplayValue,
    /// `"{보유 비율} | {보유 가치}"`
    pub holding: DisplayValue,
}

impl SummaryDisplay {
    /// 요약이 없으면 모든 항목을 `--`로 채웁니다.
    pub fn from_summary(summary: Option<&SummaryView>) -> Self {
        match summary {
            Some(view) => Self {
                total_value: DisplayValue::neutral(format_money(view.total_value)),
                total_profit: DisplayValue::signed_money(view.total_profit),
                realized_profit: DisplayValue::signed_money(view.realized_profit),
                unrealized_profit: DisplayValue::signed_money(view.unrealized_profit),
                price_change: DisplayValue::signed_percent(view.cumulative_change_percent),
                holding: DisplayValue::neutral(format!(
                    "{} | {}",
                    format_percent(view.holding_percent),
                    format_money(view.holding_value)
                )),
            },
            None => Self::unavailable(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            total_value: DisplayValue::placeholder(),
            total_profit: DisplayValue::placeholder(),
            realized_profit: DisplayValue::placeholder(),
            unrealized_profit: DisplayValue::placeholder(),
            price_change: DisplayValue::placeholder(),
            holding: DisplayValue::placeholder(),
        }
    }

    /// 라벨과 값 쌍 (표시 순서).
    pub fn rows(&self) -> [(&'static str, &DisplayValue); 6] {
        [
            ("총 가치", &self.total_value),
            ("총 손익", &self.total_profit),
            ("실현 손익", &self.realized_profit),
            ("미실현 손익", &self.unrealized_profit),
            ("가격 변동", &self.price_change),
            ("보유", &self.holding),
        ]
    }
}

/// 노드 목록의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeListEntry {
    pub sequence: u32,
    pub trade_type: TradeType,
    /// `노드 {순번} · {부호 있는 변동률}`
    pub title: String,
    pub title_tone: Tone,
    /// `매도 {비율}% | {대금}` 또는 `매수 {금액}`
    pub detail: String,
    /// 가격 변동, 보유 비율, 보유 가치
    pub result: String,
}

impl From<&EventRecord> for NodeListEntry {
    fn from(record: &EventRecord) -> Self {
        let detail = match record.trade_type {
            TradeType::Sell => format!(
                "매도 {} | {}",
                format_percent(record.trade_percent),
                format_money(record.trade_value)
            ),
            TradeType::Buy => format!("매수 {}", format_money(record.trade_value)),
        };

        Self {
            sequence: record.sequence,
            trade_type: record.trade_type,
            title: format!(
                "노드 {} · {}",
                record.sequence,
                format_signed_percent(record.change_percent)
            ),
            title_tone: Tone::of(record.change_percent),
            detail,
            result: format!(
                "가격 {} · 보유 {} · {}",
                format_signed_percent(record.price_change_percent),
                format_percent(record.holding_percent),
                format_money(record.holding_value)
            ),
        }
    }
}

/// 최신 노드가 먼저 오는 목록.
pub fn node_list(events: &[EventRecord]) -> Vec<NodeListEntry> {
    events.iter().rev().map(NodeListEntry::from).collect()
}
