//! # Profitsim Core
//!
//! 단일 포지션 손익 시뮬레이터의 핵심 도메인 모델과 회계 엔진을 제공합니다.
//!
//! - 포지션 상태, 노드 요청/기록, 요약 수치
//! - 가중 평균 원가 기반 회계 엔진과 호출자 소유 세션
//! - Decimal 유틸리티
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use engine::*;
pub use error::*;
pub use types::*;
