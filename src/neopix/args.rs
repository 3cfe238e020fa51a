use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "neopix-diff", version, arg_required_else_help = true)]
#[command(about = "Compare an image with its baseline and fail on visual regressions", long_about = None)]
pub struct Cli {
    /// Image to compare. Required
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Mismatch percentage above which the run fails [default: 1]
    #[arg(short, long, value_name = "FLOAT", value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// What to ignore: nothing, less, antialiasing, colors or alpha
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Base directory for the baseline, updated and diff folders
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Abort when the workspace cannot be updated instead of diffing what is there
    #[arg(long)]
    pub strict: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    neopix::config::validate_threshold(value).map_err(|e| e.to_string())
}
