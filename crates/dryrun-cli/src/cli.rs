#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use dryrun_core::codec;
use dryrun_core::{AlgorithmId, EngineConfig, PlaybackController, TraceBuilder, Value};

use crate::error::{CliError, Result};
use crate::logging::{LogFormat, init_tracing};
use crate::render;

#[derive(Debug, Parser)]
#[command(
    name = "dryrun",
    about = "Step-by-step dry runs of classic sorting algorithms",
    version
)]
pub struct Cli {
    /// Engine configuration file (TOML or JSON, chosen by extension).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log output format on stderr. Filter with RUST_LOG (default `warn`).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the supported algorithms and their properties.
    List(ListArgs),

    /// Record a full dry run and print every step.
    Run(RunArgs),

    /// Print a single step of a dry run.
    Show(ShowArgs),

    /// Rebuild traces and check their invariants and determinism.
    Verify(VerifyArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Jsonl,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Algorithm name, e.g. `bubble`, `odd-even`, `quicksort`.
    pub algorithm: String,

    /// Values to sort, space or comma separated.
    #[arg(allow_negative_numbers = true, value_delimiter = ',')]
    pub values: Vec<Value>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub algorithm: String,

    #[arg(allow_negative_numbers = true, value_delimiter = ',')]
    pub values: Vec<Value>,

    /// One-based step number; out-of-range numbers clamp to the first or last step.
    #[arg(long, allow_negative_numbers = true)]
    pub step: i64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Algorithm name, or `all`.
    pub algorithm: String,

    #[arg(allow_negative_numbers = true, value_delimiter = ',')]
    pub values: Vec<Value>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    tracing::debug!(
        target: "dryrun.cli",
        config = ?cli.config,
        max_len = config.max_len,
        "configuration loaded"
    );
    let builder = TraceBuilder::new(config);

    match cli.command {
        Commands::List(args) => run_list(&args, out),
        Commands::Run(args) => run_trace(&builder, &args, out),
        Commands::Show(args) => run_show(&builder, &args, out),
        Commands::Verify(args) => run_verify(&builder, &args, out),
    }
}

fn run_list(args: &ListArgs, out: &mut impl Write) -> Result<()> {
    let entries = AlgorithmId::ALL.map(AlgorithmId::info);
    match args.format {
        OutputFormat::Text => write!(out, "{}", render::catalog_text())?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?,
        OutputFormat::Jsonl => {
            for entry in &entries {
                writeln!(out, "{}", serde_json::to_string(entry)?)?;
            }
        }
    }
    Ok(())
}

fn run_trace(builder: &TraceBuilder, args: &RunArgs, out: &mut impl Write) -> Result<()> {
    let trace = builder.build_named(&args.algorithm, &args.values)?;
    match args.format {
        OutputFormat::Text => write!(out, "{}", render::trace_text(&trace))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&trace)?)?,
        OutputFormat::Jsonl => write!(out, "{}", codec::encode(&trace)?)?,
    }
    Ok(())
}

#[derive(Serialize)]
struct StepView<'a> {
    step: usize,
    total: usize,
    #[serde(flatten)]
    detail: &'a dryrun_core::Step,
    highlights: dryrun_core::Highlights,
}

fn run_show(builder: &TraceBuilder, args: &ShowArgs, out: &mut impl Write) -> Result<()> {
    let trace = builder.build_named(&args.algorithm, &args.values)?;
    let mut playback = PlaybackController::new(trace);
    playback.seek(args.step.saturating_sub(1));

    match args.format {
        OutputFormat::Text => write!(out, "{}", render::step_text(&playback))?,
        OutputFormat::Json | OutputFormat::Jsonl => {
            let view = StepView {
                step: playback.cursor() + 1,
                total: playback.len(),
                detail: playback.current(),
                highlights: playback.current().highlights(),
            };
            writeln!(out, "{}", serde_json::to_string(&view)?)?;
        }
    }
    Ok(())
}

fn run_verify(builder: &TraceBuilder, args: &VerifyArgs, out: &mut impl Write) -> Result<()> {
    let ids: Vec<AlgorithmId> = if args.algorithm.eq_ignore_ascii_case("all") {
        AlgorithmId::ALL.to_vec()
    } else {
        vec![args.algorithm.parse()?]
    };

    for id in ids {
        let trace = builder.build(id, &args.values)?;
        let fail = |reason: String| CliError::Verification {
            algorithm: id.to_string(),
            reason,
        };

        trace.verify().map_err(|v| fail(v.to_string()))?;
        let again = builder.build(id, &args.values)?;
        if again != trace {
            return Err(fail("rebuilding produced a different trace".to_string()));
        }
        let decoded = codec::decode(&codec::encode(&trace)?)?;
        if decoded.fingerprint() != trace.fingerprint() {
            return Err(fail("decoded trace has a different fingerprint".to_string()));
        }

        writeln!(
            out,
            "ok  {:<10} {:>6} steps  {}",
            id.as_str(),
            trace.len(),
            trace.fingerprint()
        )?;
    }
    Ok(())
}
