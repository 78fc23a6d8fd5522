//! 회계 불변식 속성 테스트.
//!
//! 임의의 유효한 노드 시퀀스에 대해 다음을 확인합니다:
//! 1. 보유 수량, 원가, 가격, 누적 매도 대금은 항상 0 이상
//! 2. 누적 매도 대금과 실현 손익은 매도에서만 변함
//! 3. 전량 매도 후 수량과 원가는 정확히 0
//! 4. 요약은 멱등
//! 5. 0 이하의 초기 가치와 매수 금액은 거부됨

use proptest::prelude::*;
use profitsim_core::{EventRequest, Session, SimError, TradeAction};
use rust_decimal::Decimal;

// ── 생성기 ───────────────────────────────────────────────────────────

fn arb_change_percent() -> impl Strategy<Value = Decimal> {
    // -200% ~ +300%, 소수점 2자리. -100% 미만은 거부되어야 함
    (-20_000i64..30_000).prop_map(|v| Decimal::new(v, 2))
}

fn arb_valid_change_percent() -> impl Strategy<Value = Decimal> {
    (-10_000i64..30_000).prop_map(|v| Decimal::new(v, 2))
}

fn arb_non_positive() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=0).prop_map(|v| Decimal::new(v, 2))
}

fn arb_sell_percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|v| Decimal::new(v, 2))
}

fn arb_buy_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|v| Decimal::new(v, 2))
}

fn arb_request() -> impl Strategy<Value = EventRequest> {
    prop_oneof![
        (arb_change_percent(), arb_sell_percent()).prop_map(|(c, p)| EventRequest::sell(c, p)),
        (arb_change_percent(), arb_buy_amount()).prop_map(|(c, a)| EventRequest::buy(c, a)),
    ]
}

fn arb_initial_value() -> impl Strategy<Value = Decimal> {
    (100i64..10_000_000).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #[test]
    fn holdings_and_cost_never_negative(
        initial in arb_initial_value(),
        requests in prop::collection::vec(arb_request(), 1..30),
    ) {
        let mut session = Session::default();
        session.initialize(initial).unwrap();

        for request in requests {
            // 보유 없이 매도하는 요청은 거부되며 상태가 그대로여야 함
            let before = *session.state();
            match session.apply_event(request) {
                Ok(_) => {}
                Err(_) => prop_assert_eq!(*session.state(), before),
            }

            let state = session.state();
            prop_assert!(state.shares >= Decimal::ZERO);
            prop_assert!(state.cost_basis_total >= Decimal::ZERO);
            prop_assert!(state.price >= Decimal::ZERO);
            prop_assert!(state.realized_proceeds >= Decimal::ZERO);
        }
    }

    #[test]
    fn price_below_zero_is_rejected(
        initial in arb_initial_value(),
        change in (-100_000i64..-10_000).prop_map(|v| Decimal::new(v, 2)),
        percent in arb_sell_percent(),
        amount in arb_buy_amount(),
    ) {
        let mut session = Session::default();
        session.initialize(initial).unwrap();
        let before = *session.state();

        for request in [EventRequest::sell(change, percent), EventRequest::buy(change, amount)] {
            let err = session.apply_event(request).unwrap_err();
            prop_assert!(matches!(err, SimError::InvalidInput(_)));
        }
        prop_assert_eq!(*session.state(), before);
        prop_assert!(session.events().is_empty());
    }

    #[test]
    fn non_positive_inputs_are_rejected(
        value in arb_non_positive(),
        initial in arb_initial_value(),
        change in arb_valid_change_percent(),
    ) {
        let mut session = Session::default();
        prop_assert!(matches!(session.initialize(value), Err(SimError::InvalidInput(_))));
        prop_assert!(!session.is_initialized());

        session.initialize(initial).unwrap();
        let before = *session.state();
        let err = session.apply_event(EventRequest::buy(change, value)).unwrap_err();
        prop_assert!(matches!(err, SimError::InvalidInput(_)));
        prop_assert_eq!(*session.state(), before);
        prop_assert!(session.events().is_empty());
    }

    #[test]
    fn realized_figures_only_move_on_sells(
        initial in arb_initial_value(),
        requests in prop::collection::vec(arb_request(), 1..30),
    ) {
        let mut session = Session::default();
        session.initialize(initial).unwrap();
        let mut proceeds_sum = Decimal::ZERO;

        for request in requests {
            let before = *session.state();
            if let Ok(record) = session.apply_event(request) {
                let trade_value = record.trade_value;
                let state = session.state();
                match request.action {
                    TradeAction::Buy { .. } => {
                        prop_assert_eq!(state.realized_proceeds, before.realized_proceeds);
                        prop_assert_eq!(state.realized_profit, before.realized_profit);
                    }
                    TradeAction::Sell { .. } => proceeds_sum += trade_value,
                }
            }
        }

        prop_assert_eq!(session.state().realized_proceeds, proceeds_sum);
    }

    #[test]
    fn full_liquidation_is_exact(
        initial in arb_initial_value(),
        requests in prop::collection::vec(arb_request(), 0..20),
        final_change in arb_valid_change_percent(),
    ) {
        let mut session = Session::default();
        session.initialize(initial).unwrap();
        for request in requests {
            let _ = session.apply_event(request);
        }

        if session.state().shares > Decimal::ZERO {
            session
                .apply_event(EventRequest::sell(final_change, Decimal::ONE_HUNDRED))
                .unwrap();
            prop_assert_eq!(session.state().shares, Decimal::ZERO);
            prop_assert_eq!(session.state().cost_basis_total, Decimal::ZERO);
        }
    }

    #[test]
    fn summarize_is_idempotent(
        initial in arb_initial_value(),
        requests in prop::collection::vec(arb_request(), 0..10),
    ) {
        let mut session = Session::default();
        session.initialize(initial).unwrap();
        for request in requests {
            let _ = session.apply_event(request);
        }

        prop_assert_eq!(session.summarize(), session.summarize());
    }
}
