//! 대화형 세션 명령어.
//!
//! 한 줄에 명령 하나를 읽어 세션에 적용합니다. 엔진 에러는 출력만 하고
//! 세션은 계속됩니다.
//!
//! # 사용 예시
//!
//! ```text
//! > init 1000
//! > sell 10 50
//! > buy -5 200
//! > summary
//! > chart
//! > quit
//! ```

use anyhow::Result;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

use profitsim_chart::{node_list, ChartProjector, NodeListEntry, SummaryDisplay};
use profitsim_core::{ChartConfig, EventRequest, PortfolioEngine, Session};

use super::render::{render_chart, render_nodes, render_summary};

const HELP: &str = "\
명령어:
  init <초기 가치>            세션 초기화 (기존 노드 폐기)
  sell <변동률%> <매도 비율%>  매도 노드 추가
  buy <변동률%> <매수 금액>    매수 노드 추가
  summary                     요약 보기
  nodes                       노드 목록 (최신 순)
  chart                       차트 투영 보기
  reset                       초기화 전 상태로 되돌리기
  help                        도움말
  quit                        종료";

/// 세션 명령.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Init(Decimal),
    Apply(EventRequest),
    Summary,
    Nodes,
    Chart,
    Reset,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = parts
            .next()
            .ok_or_else(|| "명령을 입력하세요".to_string())?
            .to_lowercase();
        let args: Vec<&str> = parts.collect();

        let parsed = match (command.as_str(), args.as_slice()) {
            ("init", [value]) => Self::Init(parse_number(value)?),
            ("sell", [change, percent]) => Self::Apply(EventRequest::sell(
                parse_number(change)?,
                parse_number(percent)?,
            )),
            ("buy", [change, amount]) => Self::Apply(EventRequest::buy(
                parse_number(change)?,
                parse_number(amount)?,
            )),
            ("summary", []) => Self::Summary,
            ("nodes", []) => Self::Nodes,
            ("chart", []) => Self::Chart,
            ("reset", []) => Self::Reset,
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            ("init" | "sell" | "buy" | "summary" | "nodes" | "chart" | "reset" | "help", _) => {
                return Err(format!("'{}' 명령의 인자가 올바르지 않습니다 (help 참고)", command))
            }
            _ => return Err(format!("알 수 없는 명령: {}", command)),
        };
        Ok(parsed)
    }
}

/// `%`와 천 단위 구분자를 허용하는 숫자 파싱.
fn parse_number(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| format!("숫자가 아닙니다: {}", raw))
}

/// 명령 실행 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// 출력 후 계속
    Continue(String),
    /// 종료
    Quit,
}

/// 대화형 세션.
#[derive(Debug, Clone)]
pub struct SessionShell {
    session: Session,
    projector: ChartProjector,
}

impl SessionShell {
    pub fn new(engine: PortfolioEngine, chart: ChartConfig) -> Self {
        Self {
            session: Session::new(engine),
            projector: ChartProjector::new(chart),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 한 줄을 해석해 실행합니다.
    pub fn execute(&mut self, line: &str) -> ShellOutcome {
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => return ShellOutcome::Continue(format!("⚠️  {}", message)),
        };
        debug!(?command, "Shell command");

        let output = match command {
            ShellCommand::Init(value) => match self.session.initialize(value).map(|_| ()) {
                Ok(()) => self.summary(),
                Err(e) => format!("⚠️  {}", e),
            },
            ShellCommand::Apply(request) => match self.session.apply_event(request) {
                Ok(record) => {
                    let entry = NodeListEntry::from(record);
                    format!("✅ {}\n   {}\n   {}", entry.title, entry.detail, entry.result)
                }
                Err(e) => format!("⚠️  {}", e),
            },
            ShellCommand::Summary => self.summary(),
            ShellCommand::Nodes => render_nodes(&node_list(self.session.events())),
            ShellCommand::Chart => render_chart(&self.projector.project_session(&self.session)),
            ShellCommand::Reset => {
                self.session.reset();
                "세션을 초기화 전 상태로 되돌렸습니다".to_string()
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return ShellOutcome::Quit,
        };
        ShellOutcome::Continue(output)
    }

    fn summary(&self) -> String {
        render_summary(&SummaryDisplay::from_summary(
            self.session.summarize().as_ref(),
        ))
    }

    /// 입력이 끝나거나 `quit`을 만날 때까지 반복합니다.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", HELP)?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(output, "> ")?;
                output.flush()?;
                continue;
            }

            match self.execute(&line) {
                ShellOutcome::Continue(text) => writeln!(output, "{}", text)?,
                ShellOutcome::Quit => break,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        Ok(())
    }
}

impl Default for SessionShell {
    fn default() -> Self {
        Self::new(PortfolioEngine::default(), ChartConfig::default())
    }
}
