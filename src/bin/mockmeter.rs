//! Mockmeter CLI - Command-line interface for the scoring engine
//!
//! Commands:
//! - replay: Score a recorded session event stream (NDJSON)
//! - domains: Inspect the built-in question bank

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use mockmeter::host::{Clock, IdGenerator, SystemClock, UuidGenerator};
use mockmeter::questions;
use mockmeter::replay::{parse_ndjson, run_replay};
use mockmeter::session::SessionConfig;
use mockmeter::{ENGINE_VERSION, PRODUCER_NAME};

/// Mockmeter - On-device scoring engine for mock-interview sessions
#[derive(Parser)]
#[command(name = "mockmeter")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score recorded mock-interview sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a recorded session event stream
    Replay {
        /// Input NDJSON file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Session configuration JSON file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Interview domain (overrides the config file)
        #[arg(long)]
        domain: Option<String>,

        /// Number of questions (overrides the config file)
        #[arg(long)]
        questions: Option<usize>,

        /// Session start, unix epoch milliseconds (now when omitted)
        #[arg(long)]
        started_at_ms: Option<i64>,

        /// Emit pretty-printed JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Inspect the built-in question bank
    Domains {
        /// Print the question list of one domain instead of all names
        #[arg(long)]
        domain: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Replay {
            input,
            output,
            config,
            domain,
            questions,
            started_at_ms,
            pretty,
        } => cmd_replay(
            input,
            output,
            config,
            domain,
            questions,
            started_at_ms,
            pretty,
        ),
        Commands::Domains { domain } => cmd_domains(domain),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}: {}", PRODUCER_NAME, message);
            ExitCode::FAILURE
        }
    }
}

fn cmd_replay(
    input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    domain: Option<String>,
    question_count: Option<usize>,
    started_at_ms: Option<i64>,
    pretty: bool,
) -> Result<(), String> {
    let mut config = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            serde_json::from_str::<SessionConfig>(&raw)
                .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
        }
        None => SessionConfig::default(),
    };
    if let Some(domain) = domain {
        config.domain = domain;
    }
    if let Some(count) = question_count {
        config.question_count = count;
    }

    let ndjson = read_input(&input)?;
    let events = parse_ndjson(&ndjson).map_err(|e| e.to_string())?;

    let started_at = started_at_ms.unwrap_or_else(|| SystemClock.now_ms());
    let id = UuidGenerator.generate();
    let result = run_replay(config, started_at, &events, id).map_err(|e| e.to_string())?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| e.to_string())?;

    write_output(&output, &json)
}

fn cmd_domains(domain: Option<String>) -> Result<(), String> {
    match domain {
        Some(requested) => {
            let resolved = questions::resolve_domain(&requested);
            println!("{}", resolved);
            for question in questions::question_list(resolved) {
                println!("  {}", question);
            }
        }
        None => {
            for name in questions::domains() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

fn read_input(path: &PathBuf) -> Result<String, String> {
    if path.as_os_str() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("{}: reading events from stdin...", PRODUCER_NAME);
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
    }
}

fn write_output(path: &PathBuf, json: &str) -> Result<(), String> {
    if path.as_os_str() == "-" {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", json).map_err(|e| format!("cannot write stdout: {}", e))
    } else {
        fs::write(path, format!("{}\n", json))
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))
    }
}
