//! CLI 명령어 구현 모듈.

pub mod render;
pub mod run;
pub mod session;

pub use render::OutputFormat;
pub use run::{load_scenario, run_scenario, Scenario, ScenarioReport};
pub use session::SessionShell;
