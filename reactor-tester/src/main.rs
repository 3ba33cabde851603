mod common;
mod live;
mod logic;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use reactor_game::{EndpointConfig, GameKind, ShipLink};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::split_csv;
use live::HttpEndpoint;
use logic::{LogicTester, ScenarioResult, Target, resolve_seed_inputs};
use scenario::{catalog_scenarios, find_scenario, list_scenarios};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Simulated ship console (fast, deterministic)
    Logic,
    /// Send every command to a running game server
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "reactor-tester", version)]
#[command(about = "Automated QA for the Reactor Ops mini-games - simulated and live ship consoles")]
struct Args {
    /// Where commands go: an in-process console or a live server
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Base URL of the game server's HTTP API (live mode and --probe)
    #[arg(long, default_value = "http://localhost:8080")]
    endpoint: String,

    /// Ship callsign; defaults to each game's own
    #[arg(long)]
    callsign: Option<String>,

    /// Scenarios to run (comma-separated, `all` for the whole catalog)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated; hex and `a..b` ranges accepted)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Spawn the test planet next to the ship and print the answer
    #[arg(long)]
    probe: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }
    if args.probe {
        return probe(&args).await;
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let results = run_scenarios(&args, &scenarios, &seeds).await;

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🛰 Reactor Ops Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn target(args: &Args) -> Target {
    match args.mode {
        TestMode::Logic => Target::Recording,
        TestMode::Live => Target::Live {
            base_url: args.endpoint.clone(),
            callsign: args.callsign.clone(),
        },
    }
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for scenario in catalog_scenarios() {
            if !scenarios.iter().any(|s| s == scenario.key) {
                scenarios.push(scenario.key.to_string());
            }
        }
    }
    scenarios
}

async fn run_scenarios(args: &Args, scenarios: &[String], seeds: &[u64]) -> Vec<ScenarioResult> {
    let label = match args.mode {
        TestMode::Logic => "🧠 Running Logic Tests",
        TestMode::Live => "📡 Running Live Tests",
    };
    println!("{}", label.bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(target(args), args.verbose);
    let mut results = Vec::new();
    for name in scenarios {
        let Some(scenario) = find_scenario(name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        if args.mode == TestMode::Live && !scenario.runs_live() {
            eprintln!(
                "⚠️  Scenario {} scripts the ship and only runs in logic mode",
                name.yellow()
            );
            continue;
        }
        results.extend(tester.run_scenario(&scenario, seeds, args.iterations).await);
    }
    results
}

async fn probe(args: &Args) -> Result<()> {
    let config = EndpointConfig {
        base_url: args.endpoint.clone(),
        callsign: args
            .callsign
            .clone()
            .unwrap_or_else(|| GameKind::ReactorRealignment.default_callsign().to_string()),
    };
    let endpoint = HttpEndpoint::new(&config).context("failed to build HTTP client")?;
    let link = ShipLink::new(endpoint, config);
    println!("📡 Probing {}", link.endpoint().url());
    let response = link
        .probe()
        .await
        .with_context(|| format!("probe of {} failed", link.endpoint().url()))?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "{}", serde_json::to_string_pretty(&response)?)?;
    output_target.flush_inner()?;
    Ok(())
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(&mut output_target, results)?;
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
