//! Command-line interface for scorm-runtime.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::runtime::TerminateGuard;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Initial data mapping (JSON object of scalars).
    pub data: Option<PathBuf>,
    /// Attempt record to seed review-mode data from.
    pub attempt: Option<PathBuf>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Terminate guard interpretation (overrides config file).
    pub terminate_guard: Option<TerminateGuard>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Print the final data mapping after the transcript.
    pub dump: bool,
    /// Print the transcript as JSON lines.
    pub json: bool,
    /// Call script; standard input when absent.
    pub script: Option<PathBuf>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('d') | Long("data") => {
                result.data = Some(parser.value()?.parse()?);
            }
            Short('a') | Long("attempt") => {
                result.attempt = Some(parser.value()?.parse()?);
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("terminate-guard") => {
                let value: String = parser.value()?.parse()?;
                result.terminate_guard = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("terminate-guard", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("dump") => {
                result.dump = true;
            }
            Long("json") => {
                result.json = true;
            }
            Value(val) if result.script.is_none() => {
                result.script = Some(PathBuf::from(val));
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    if result.data.is_some() && result.attempt.is_some() {
        return Err(ArgsError::Conflict("data", "attempt"));
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"scorm-runtime {version}
Stub SCORM 1.2 runtime API with a call-script replayer

USAGE:
    scorm-runtime [OPTIONS] [SCRIPT]

ARGS:
    <SCRIPT>                    Call script, one call per line [default: stdin]

OPTIONS:
    -d, --data <FILE>           Initial data mapping (JSON object)
    -a, --attempt <FILE>        Attempt record; seeds review-mode data
    -c, --config <FILE>         Path to configuration file (JSON)
    -t, --terminate-guard <M>   ignore-unbound | unbound-reference
    -l, --log-level <LVL>       Log level (error, warn, info, debug, trace)
        --dump                  Print the final data mapping as JSON
        --json                  Print the transcript as JSON lines
    -h, --help                  Print help
    -V, --version               Print version

ENVIRONMENT VARIABLES:
    SCORM_RUNTIME_TERMINATE_GUARD  Terminate guard (overrides config)
    SCORM_RUNTIME_LOG_LEVEL        Log level (overrides config)
    RUST_LOG                       Alternative log level setting

EXAMPLES:
    # Replay a script against an empty data store
    scorm-runtime calls.txt

    # Seed from a JSON mapping and show what the content left behind
    scorm-runtime -d seed.json --dump calls.txt

    # Review a recorded attempt
    echo 'Initialize("")
    GetValue("cmi.mode")' | scorm-runtime -a attempt.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("scorm-runtime {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
    /// Two options that cannot be combined.
    Conflict(&'static str, &'static str),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
            Self::Conflict(a, b) => {
                write!(f, "--{} cannot be used with --{}", a, b)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
