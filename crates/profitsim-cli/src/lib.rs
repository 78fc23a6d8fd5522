//! 시뮬레이터 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 시나리오 파일 일괄 실행
//! - 대화형 세션
//! - 텍스트/JSON 출력

pub mod commands;

pub use commands::*;
