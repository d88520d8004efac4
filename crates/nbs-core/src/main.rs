//! nb-sentiment CLI.
//!
//! Scores short messages against a trained Naive Bayes model:
//! - `score`: one message from arguments, or one per line with `--stdin`
//! - `explain`: per-word evidence breakdown
//! - `model show|validate`: inspect the resolved model or check a file

use clap::{Args, Parser, Subcommand, ValueEnum};
use nbs_common::error::format_error_human;
use nbs_common::{Error, OutputFormat, StructuredError, SCHEMA_VERSION};
use nbs_config::resolve::{ModelPath, ModelSource};
use nbs_core::config::{load_model, load_model_file, LoadOptions, LoadedModel};
use nbs_core::exit_codes::ExitCode;
use nbs_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel, Stage,
};
use nbs_core::output::{
    render, BatchItem, BatchReport, Envelope, ExplainReport, ModelReport, Render, ScoreReport,
};
use nbs_core::{EvidenceLedger, Model, ModelStore, Scorer, Tokenize, TweetTokenizer, WhitespaceTokenizer};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// Naive Bayes sentiment scoring for short messages
#[derive(Parser)]
#[command(name = "nbs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to the model file (falls back to NBS_MODEL)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Directory containing model.json (falls back to NBS_CONFIG_DIR)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log line format on stderr (falls back to NBS_LOG_FORMAT)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// How raw text is split into words
    #[arg(long, global = true, value_enum, default_value_t = TokenizerKind::Tweet)]
    tokenizer: TokenizerKind,

    /// Disable stemming in the tweet tokenizer
    #[arg(long, global = true)]
    no_stem: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TokenizerKind {
    /// Social-media normalization with stopwords and stemming
    Tweet,
    /// Split on whitespace only
    Whitespace,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a message (exit 1 when a single message is negative)
    Score(ScoreArgs),

    /// Show how each word moved the score
    Explain(ExplainArgs),

    /// Inspect or validate the model
    Model(ModelArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Message text; multiple words are joined with spaces
    text: Vec<String>,

    /// Read one message per line from stdin
    #[arg(long, conflicts_with = "text")]
    stdin: bool,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Message text; multiple words are joined with spaces
    #[arg(required = true)]
    text: Vec<String>,
}

#[derive(Args, Debug)]
struct ModelArgs {
    #[command(subcommand)]
    command: ModelCommands,
}

#[derive(Subcommand, Debug)]
enum ModelCommands {
    /// Print the resolved model's snapshot
    Show,

    /// Load and validate a model file
    Validate {
        /// Model file to check (defaults to the resolved model)
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let run_id = generate_run_id();
    tracing::debug!(target: event_names::RUN_STARTED, run_id = %run_id, "run started");

    let result = match &cli.command {
        Commands::Score(args) => run_score(&cli.global, args, &run_id),
        Commands::Explain(args) => run_explain(&cli.global, args, &run_id),
        Commands::Model(args) => match &args.command {
            ModelCommands::Show => run_model_show(&cli.global, &run_id),
            ModelCommands::Validate { path } => {
                run_model_validate(&cli.global, path.as_ref(), &run_id)
            }
        },
        Commands::Version => print_version(&cli.global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => report_error(&cli.global, &err),
    };

    tracing::debug!(
        target: event_names::RUN_FINISHED,
        run_id = %run_id,
        exit_code = exit_code.as_i32(),
        "run finished"
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn load_options(global: &GlobalOpts) -> LoadOptions {
    LoadOptions {
        model_path: global.model.clone(),
        config_dir: global.config.clone(),
    }
}

fn loaded_model(global: &GlobalOpts) -> Result<&'static LoadedModel, Error> {
    Ok(ModelStore::global().get_or_load(&load_options(global))?)
}

/// Pick the tokenizer; stemming follows the model unless disabled.
fn tokenizer_for(global: &GlobalOpts, model: &Model) -> Box<dyn Tokenize> {
    match global.tokenizer {
        TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        TokenizerKind::Tweet => {
            Box::new(TweetTokenizer::new().with_stemming(!global.no_stem && model.is_stemmed()))
        }
    }
}

fn run_score(global: &GlobalOpts, args: &ScoreArgs, run_id: &str) -> Result<ExitCode, Error> {
    if !args.stdin && args.text.is_empty() {
        return Err(Error::InvalidInput(
            "no message given; pass TEXT or --stdin".to_string(),
        ));
    }

    let loaded = loaded_model(global)?;
    let scorer = Scorer::new(&loaded.model);
    let tokenizer = tokenizer_for(global, &loaded.model);

    if args.stdin {
        return run_score_batch(global, &scorer, tokenizer.as_ref(), run_id);
    }

    let text = args.text.join(" ");
    let eval = scorer.evaluate(&text, tokenizer.as_ref());
    let exit_code = if eval.polarity.is_positive() {
        ExitCode::Clean
    } else {
        ExitCode::NegativeSentiment
    };
    let report = ScoreReport::new(Envelope::new(run_id), text, eval)
        .with_model(loaded.snapshot.name.clone());
    emit(&report, global.format)?;
    Ok(exit_code)
}

fn run_score_batch(
    global: &GlobalOpts,
    scorer: &Scorer<'_>,
    tokenizer: &dyn Tokenize,
    run_id: &str,
) -> Result<ExitCode, Error> {
    let stdin = std::io::stdin();
    let mut results = Vec::new();

    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line.map_err(|err| {
            if err.kind() == std::io::ErrorKind::InvalidData {
                Error::InvalidInput(format!("line {} is not valid UTF-8", idx + 1))
            } else {
                Error::Io(err)
            }
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let eval = scorer.evaluate(&line, tokenizer);
        results.push(BatchItem {
            line: idx + 1,
            text: line,
            tokens: eval.tokens,
            score: eval.score,
            polarity: eval.polarity,
        });
    }

    let report = BatchReport::new(Envelope::new(run_id), results);
    tracing::info!(
        target: event_names::BATCH_FINISHED,
        stage = %Stage::Output,
        count = report.count,
        positive = report.positive,
        negative = report.negative,
        "batch scored"
    );
    emit(&report, global.format)?;
    Ok(ExitCode::Clean)
}

fn run_explain(global: &GlobalOpts, args: &ExplainArgs, run_id: &str) -> Result<ExitCode, Error> {
    let loaded = loaded_model(global)?;
    let tokenizer = tokenizer_for(global, &loaded.model);

    let text = args.text.join(" ");
    let tokens = tokenizer.tokenize(&text);
    let ledger = EvidenceLedger::build(&tokens, &loaded.model);
    let report = ExplainReport {
        envelope: Envelope::new(run_id),
        text,
        tokens,
        ledger,
    };
    emit(&report, global.format)?;
    Ok(ExitCode::Clean)
}

fn run_model_show(global: &GlobalOpts, run_id: &str) -> Result<ExitCode, Error> {
    let loaded = loaded_model(global)?;
    let report = ModelReport {
        envelope: Envelope::new(run_id),
        valid: true,
        model: loaded.snapshot.clone(),
    };
    emit(&report, global.format)?;
    Ok(ExitCode::Clean)
}

fn run_model_validate(
    global: &GlobalOpts,
    path: Option<&PathBuf>,
    run_id: &str,
) -> Result<ExitCode, Error> {
    let loaded = match path {
        Some(path) => load_model_file(&ModelPath {
            path: path.clone(),
            source: ModelSource::CliArgument,
        })?,
        None => load_model(&load_options(global))?,
    };
    let report = ModelReport {
        envelope: Envelope::new(run_id),
        valid: true,
        model: loaded.snapshot,
    };
    emit(&report, global.format)?;
    Ok(ExitCode::Clean)
}

fn print_version(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "nbs_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    let mut stdout = std::io::stdout().lock();
    match global.format {
        OutputFormat::Json => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&version_info)?)?;
        }
        OutputFormat::Jsonl => writeln!(stdout, "{}", version_info)?,
        OutputFormat::Exitcode => {}
        _ => {
            writeln!(stdout, "nbs {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(stdout, "schema version: {}", SCHEMA_VERSION)?;
        }
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// Output helpers
// ============================================================================

fn emit<T: Render>(payload: &T, format: OutputFormat) -> Result<(), Error> {
    if let Some(out) = render(payload, format)? {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", out)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Print an error on stderr and pick the exit code for it.
fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let exit_code = ExitCode::for_error(err);
    tracing::debug!(
        target: event_names::RUN_FAILED,
        code = err.code(),
        exit_code = exit_code.as_i32(),
        "command failed"
    );

    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let structured =
                StructuredError::from(err).with_context("exit_code", exit_code.code_name());
            eprintln!("{}", structured.to_json());
        }
        OutputFormat::Exitcode => {}
        _ => {
            let use_color = std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
    exit_code
}
