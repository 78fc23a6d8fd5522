//! 호출자가 소유하는 시뮬레이션 세션.
//!
//! 세션은 하나의 `PositionState`와 append-only 노드 로그를 소유합니다. 전역
//! 상태는 없으며, 모든 변경은 `&mut Session`을 통해서만 일어납니다.

use tracing::{info, warn};
use uuid::Uuid;

use super::PortfolioEngine;
use crate::domain::{EventRecord, EventRequest, PositionState, SummaryView};
use crate::error::{SimError, SimResult};
use crate::types::Money;

/// 단일 포지션 시뮬레이션 세션.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    engine: PortfolioEngine,
    state: PositionState,
    events: Vec<EventRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PortfolioEngine::default())
    }
}

impl Session {
    /// 초기화되지 않은 새 세션을 생성합니다.
    pub fn new(engine: PortfolioEngine) -> Self {
        Self {
            id: Uuid::new_v4(),
            engine,
            state: PositionState::uninitialized(),
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn engine(&self) -> &PortfolioEngine {
        &self.engine
    }

    pub fn state(&self) -> &PositionState {
        &self.state
    }

    /// 적용된 노드 기록 (순번 오름차순).
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// 초기 매수 가치로 세션을 (재)시작합니다. 기존 노드 로그는 폐기됩니다.
    pub fn initialize(&mut self, value: Money) -> SimResult<&PositionState> {
        let _span = crate::session_span!("initialize", self.id).entered();

        let state = self.engine.initialize(value).inspect_err(|e| {
            warn!(error = %e, "Initialization rejected");
        })?;

        self.state = state;
        self.events.clear();
        info!(initial_value = %value, "Session initialized");
        Ok(&self.state)
    }

    /// 노드를 적용하고 로그에 추가합니다.
    ///
    /// 실패하면 상태와 로그는 그대로 유지됩니다.
    pub fn apply_event(&mut self, request: EventRequest) -> SimResult<&EventRecord> {
        let sequence = u32::try_from(self.events.len() + 1)
            .map_err(|_| SimError::InvalidInput("노드 수가 너무 많습니다".to_string()))?;
        let _span = crate::session_span!("apply_event", self.id, sequence).entered();

        let (state, record) = self
            .engine
            .apply_event(&self.state, sequence, &request)
            .inspect_err(|e| {
                warn!(error = %e, kind = ?e.kind(), "Event rejected");
            })?;

        self.state = state;
        self.events.push(record);
        Ok(&self.events[self.events.len() - 1])
    }

    /// 현재 요약 수치. 초기화 전이면 `None`입니다.
    pub fn summarize(&self) -> Option<SummaryView> {
        self.engine.summarize(&self.state)
    }

    /// 모든 상태와 로그를 버리고 초기화 전 상태로 되돌립니다.
    pub fn reset(&mut self) -> &PositionState {
        let _span = crate::session_span!("reset", self.id).entered();

        self.state = self.engine.reset();
        self.events.clear();
        info!("Session reset");
        &self.state
    }
}
