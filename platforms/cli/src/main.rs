use clap::{error::ErrorKind, Parser, ValueEnum};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use turtrace::{
    analyze, Emphasis, JsonTraceWriter, Outcome, ProgramLoader, TextTraceWriter, TraceFormat,
    TraceSink, TuringMachine, TuringMachineError,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  turtrace-cli rules.txt tape.txt
  turtrace-cli --max-steps 1000 --emphasis brackets rules.txt tape.txt")]
struct Cli {
    /// Rules-file: whitespace separated `state read write move next` tuples, move is one of < - >
    rules: PathBuf,

    /// Tape-file: whitespace separated initial tape symbols
    tape: PathBuf,

    /// Arguments after the two input files are accepted and ignored
    #[clap(hide = true)]
    ignored: Vec<String>,

    /// Stop after this many steps even if the machine has not halted
    #[clap(long, env = "TURTRACE_MAX_STEPS")]
    max_steps: Option<usize>,

    /// How to mark the cell under the head
    #[clap(long, value_enum, default_value_t = EmphasisArg::Auto)]
    emphasis: EmphasisArg,

    /// Output format of the trace
    #[clap(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Log more details to stderr (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmphasisArg {
    /// Underline when stdout is a terminal, brackets otherwise
    Auto,
    Ansi,
    Brackets,
}

impl EmphasisArg {
    fn resolve(self) -> Emphasis {
        match self {
            EmphasisArg::Auto if atty::is(atty::Stream::Stdout) => Emphasis::Ansi,
            EmphasisArg::Auto => Emphasis::Brackets,
            EmphasisArg::Ansi => Emphasis::Ansi,
            EmphasisArg::Brackets => Emphasis::Brackets,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for TraceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => TraceFormat::Text,
            FormatArg::Json => TraceFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_args() {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => return report(e),
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(outcome) => {
            info!(steps = outcome.steps(), "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

/// Parses the command line. Help and version requests are printed here and yield `None`.
fn parse_args() -> Result<Option<Cli>, TuringMachineError> {
    match Cli::try_parse() {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print().map_err(TuringMachineError::Io)?;
            Ok(None)
        }
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            let program = std::env::args()
                .next()
                .unwrap_or_else(|| "turtrace-cli".to_string());

            Err(TuringMachineError::Usage(format!(
                "too few arguments.\nUSE: {program} <rules.txt> <tape.txt>"
            )))
        }
        Err(e) => Err(TuringMachineError::Usage(
            e.to_string()
                .trim_start_matches("error: ")
                .trim_end()
                .to_string(),
        )),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<Outcome, TuringMachineError> {
    if !cli.ignored.is_empty() {
        debug!(ignored = ?cli.ignored, "ignoring extra arguments");
    }

    let (rules, tape) = ProgramLoader::load_inputs(&cli.rules, &cli.tape)?;

    for warning in analyze(&rules) {
        warn!("{warning}");
    }

    let out = BufWriter::new(io::stdout().lock());
    let mut sink: Box<dyn TraceSink> = match TraceFormat::from(cli.format) {
        TraceFormat::Text => Box::new(TextTraceWriter::new(out, cli.emphasis.resolve())),
        TraceFormat::Json => Box::new(JsonTraceWriter::new(out)),
    };

    let mut machine = TuringMachine::new(&rules, tape);
    match cli.max_steps {
        Some(max) => machine.run_with_limit(&mut sink, max),
        None => machine.run(&mut sink),
    }
}

/// Prints an error the way every fatal failure is reported and returns the failure status.
fn report(error: TuringMachineError) -> ExitCode {
    eprintln!("ERROR: {error}");
    ExitCode::FAILURE
}
