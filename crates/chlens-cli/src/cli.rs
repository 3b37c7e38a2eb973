//! Binary entry point for the chlens command-line tool.
#![forbid(unsafe_code)]

mod input;
mod logging;
mod render;

use anyhow::{Context, Result};
use chlens_analyzer::{PlanKind, PlanParser};
use chlens_core::ChlensConfig;
use chlens_query::{find_statement_at, split};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chlens",
    version,
    about = "Split SQL buffers into statements and normalize EXPLAIN output",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(long, global = true, value_name = "FILE", help = "Configuration file to use")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Write log events as JSON lines")]
    log_json: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a SQL buffer into statements
    Split(SplitCmd),
    /// Parse captured EXPLAIN output into a plan tree
    Explain(ExplainCmd),
}

#[derive(Args, Debug)]
struct SplitCmd {
    #[arg(value_name = "FILE", help = "SQL file to read (stdin when omitted)")]
    file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "LINE:COL",
        value_parser = input::parse_cursor,
        help = "Print only the statement under this cursor position"
    )]
    at: Option<(u32, u32)>,

    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

#[derive(Args, Debug)]
struct ExplainCmd {
    #[arg(value_name = "FILE", help = "EXPLAIN output to read (stdin when omitted)")]
    file: Option<PathBuf>,

    #[arg(long, value_name = "KIND", help = "Plan kind (plan, pipeline, ast, syntax, ...)")]
    kind: Option<String>,

    #[arg(
        long,
        value_name = "SQL",
        conflicts_with = "kind",
        help = "Detect the plan kind from the EXPLAIN query text"
    )]
    query: Option<String>,

    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ChlensConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ChlensConfig::load_default().context("Failed to load default config")?,
    };

    logging::init(&logging::LoggingConfig::resolve(
        &config.logging,
        cli.verbose,
        cli.log_json,
    ))?;

    match cli.command {
        Command::Split(cmd) => run_split(cmd),
        Command::Explain(cmd) => run_explain(cmd, config),
    }
}

fn run_split(cmd: SplitCmd) -> Result<()> {
    let buffer = input::read_source(cmd.file.as_deref())?;
    let mut statements = split(&buffer);

    if let Some((line, column)) = cmd.at {
        let Some(idx) = find_statement_at(&statements, line, column) else {
            tracing::warn!(line, column, "No statements in buffer");
            return Ok(());
        };
        statements = vec![statements.swap_remove(idx)];
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&statements)?);
    } else if cmd.at.is_some() {
        for statement in &statements {
            println!("{}", statement.text);
        }
    } else {
        println!("{}", render::statements_table(&statements));
    }
    Ok(())
}

fn run_explain(cmd: ExplainCmd, config: ChlensConfig) -> Result<()> {
    let source = input::read_source(cmd.file.as_deref())?;
    let rows = input::explain_rows(&source)?;

    let hint = match (&cmd.kind, &cmd.query) {
        (Some(kind), _) => kind.clone(),
        (None, Some(query)) => PlanKind::detect(query).marker().to_string(),
        (None, None) => PlanKind::default().marker().to_string(),
    };

    let result = PlanParser::new(config.explain).parse(&hint, &rows);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::plan_tree(&result)?);
    }
    Ok(())
}
