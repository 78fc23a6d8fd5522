//! 차트 투영 통합 테스트
//!
//! 세로축 도메인 고정점과 캔버스 경계를 검증합니다.

use profitsim_chart::{ChartProjector, Domain, EmptyState};
use profitsim_core::{AxisPolicy, ChartConfig, EventRequest, Session};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn initialized() -> Session {
    let mut session = Session::default();
    session.initialize(dec!(1000)).unwrap();
    session
}

#[test]
fn test_domain_keeps_anchors_for_small_moves() {
    let mut session = initialized();
    session
        .apply_event(EventRequest::sell(dec!(10), dec!(10)))
        .unwrap();
    session
        .apply_event(EventRequest::buy(dec!(-5), dec!(100)))
        .unwrap();

    let chart = ChartProjector::default().project_session(&session);
    assert_eq!(chart.vertical_domain, Domain::new(dec!(0), dec!(120)));
    assert_eq!(chart.polyline.len(), 3);
}

#[test]
fn test_domain_expands_past_ceiling() {
    let mut session = initialized();
    session
        .apply_event(EventRequest::sell(dec!(100), dec!(25)))
        .unwrap();

    let chart = ChartProjector::default().project_session(&session);
    assert_eq!(chart.vertical_domain, Domain::new(dec!(0), dec!(200)));
    // 200%는 플롯 상단
    assert_eq!(chart.polyline[1].y, chart.plot_area.top);
}

#[test]
fn test_reset_returns_to_awaiting_initial_value() {
    let mut session = initialized();
    session
        .apply_event(EventRequest::sell(dec!(10), dec!(50)))
        .unwrap();
    session.reset();

    let chart = ChartProjector::default().project_session(&session);
    assert_eq!(chart.empty, Some(EmptyState::AwaitingInitialValue));
    assert_eq!(
        chart.empty.map(|e| e.message()),
        Some("초기 가치 입력 대기 중")
    );
}

#[test]
fn test_projection_serializes_to_json() {
    let mut session = initialized();
    session
        .apply_event(EventRequest::sell(dec!(10), dec!(50)))
        .unwrap();

    let chart = ChartProjector::default().project_session(&session);
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["axis_policy"], "index_spaced");
    assert!(json.get("empty").is_none());
    assert_eq!(json["markers"].as_array().map(Vec::len), Some(2));
}

fn arb_request() -> impl Strategy<Value = EventRequest> {
    let change = (-9_000i64..30_000).prop_map(|v| Decimal::new(v, 2));
    prop_oneof![
        (change.clone(), 0i64..=10_000)
            .prop_map(|(c, p)| EventRequest::sell(c, Decimal::new(p, 2))),
        (change, 1i64..100_000).prop_map(|(c, a)| EventRequest::buy(c, Decimal::new(a, 2))),
    ]
}

fn arb_policy() -> impl Strategy<Value = AxisPolicy> {
    prop_oneof![Just(AxisPolicy::IndexSpaced), Just(AxisPolicy::HoldingPercent)]
}

proptest! {
    #[test]
    fn markers_stay_inside_plot_area(
        requests in prop::collection::vec(arb_request(), 0..25),
        axis_policy in arb_policy(),
    ) {
        let mut session = initialized();
        for request in requests {
            let _ = session.apply_event(request);
        }

        let config = ChartConfig { axis_policy, ..ChartConfig::default() };
        let chart = ChartProjector::new(config).project_session(&session);
        let area = chart.plot_area;
        let eps = 1e-6;

        prop_assert_eq!(chart.markers.len(), session.events().len() + 1);
        for marker in &chart.markers {
            let p = marker.position;
            prop_assert!(p.x >= area.left - eps && p.x <= area.right() + eps);
            prop_assert!(p.y >= area.top - eps && p.y <= area.bottom() + eps);
        }
        prop_assert!(chart.vertical_domain.min <= dec!(0));
        prop_assert!(chart.vertical_domain.max >= dec!(120));
    }
}
