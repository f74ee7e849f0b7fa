//! Command-line arguments.

use std::path::{Path, PathBuf};

use logo3d_eval::EvalOptions;
use logo3d_turtle::StepperConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("help requested")]
    HelpRequested,
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown option: {0}")]
    UnknownFlag(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Parsed arguments; files are not read yet.
#[derive(Debug, Default, PartialEq)]
pub struct ReplArgs {
    pub options_path: Option<PathBuf>,
    pub stepper_path: Option<PathBuf>,
    /// Commands to run instead of reading stdin, one submission per line.
    pub script: Option<PathBuf>,
}

/// Settings loaded from the files named on the command line.
#[derive(Debug, Default, PartialEq)]
pub struct ReplConfig {
    pub options: EvalOptions,
    pub stepper: StepperConfig,
}

pub fn print_usage() {
    eprintln!("Usage: logo3d [options] [script]");
    eprintln!();
    eprintln!("Reads one submission per line from <script> or stdin.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --options <file.json>   Evaluation options (loop_bound, conditionals, max_loop_iterations)");
    eprintln!("  --stepper <file.json>   Turtle speeds (speed, turn_speed)");
    eprintln!("  -h, --help              Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to see evaluator logs.");
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<ReplArgs, CliError> {
    let mut parsed = ReplArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(CliError::HelpRequested),
            "--options" => parsed.options_path = Some(flag_value(&mut iter, arg)?),
            "--stepper" => parsed.stepper_path = Some(flag_value(&mut iter, arg)?),
            flag if flag.starts_with('-') => return Err(CliError::UnknownFlag(flag.to_string())),
            path if parsed.script.is_none() => parsed.script = Some(PathBuf::from(path)),
            extra => return Err(CliError::UnexpectedArgument(extra.to_string())),
        }
    }
    Ok(parsed)
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<PathBuf, CliError> {
    iter.next()
        .map(PathBuf::from)
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

impl ReplArgs {
    /// Read the settings files, defaulting whatever is not given.
    pub fn load(&self) -> Result<ReplConfig, CliError> {
        let options = match &self.options_path {
            Some(path) => EvalOptions::from_json(&read(path)?).map_err(|source| CliError::Json {
                path: path.clone(),
                source,
            })?,
            None => EvalOptions::default(),
        };
        let stepper = match &self.stepper_path {
            Some(path) => StepperConfig::from_json(&read(path)?).map_err(|source| CliError::Json {
                path: path.clone(),
                source,
            })?,
            None => StepperConfig::default(),
        };
        Ok(ReplConfig { options, stepper })
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
