//! 손익 시뮬레이터 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 시나리오 파일 실행
//! profitsim run scenarios/sample.toml
//!
//! # JSON으로 출력
//! profitsim run scenarios/sample.toml --format json
//!
//! # 대화형 세션
//! profitsim session
//!
//! # 다른 설정 파일 사용
//! profitsim --config config/compounding.toml run scenarios/sample.toml
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use profitsim_cli::commands::run::{load_scenario, run_scenario};
use profitsim_cli::commands::{OutputFormat, SessionShell};
use profitsim_core::logging::{init_logging, LogConfig};
use profitsim_core::SimConfig;

#[derive(Parser)]
#[command(name = "profitsim")]
#[command(about = "단일 포지션 손익 시뮬레이터", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 시나리오 파일 실행 (TOML 또는 JSON)
    Run {
        /// 시나리오 파일 경로
        scenario: String,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 대화형 세션 시작
    Session,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = SimConfig::load(&cli.config)?;
    init_logging(LogConfig::from_settings(&config.logging)?)?;

    info!(config = %cli.config, price_model = %config.engine.price_model, "Starting profitsim");

    match cli.command {
        Commands::Run { scenario, format } => {
            let format: OutputFormat = format.parse().map_err(|e: String| anyhow!(e))?;
            let scenario = load_scenario(&scenario)?;
            let report = run_scenario(&scenario, config.engine.build_engine(), config.chart)?;
            println!("{}", report.render(format)?);
        }

        Commands::Session => {
            let mut shell = SessionShell::new(config.engine.build_engine(), config.chart);
            let stdin = std::io::stdin();
            shell.run(stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}
