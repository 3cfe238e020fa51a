use clap::{CommandFactory, Parser};
use colored::*;
use neopix::api::{CmdMessage, MessageLevel, NeopixApi};
use neopix::config::{NeopixConfig, RunConfig, RunOverrides};
use neopix::engine::compare::ImageCompareEngine;
use neopix::error::Result;
use neopix::paths::resolve_path;
use neopix::store::fs::FileStore;
use std::path::Path;
use std::process;

mod args;
use args::Cli;

const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(input) = cli.input.as_deref() else {
        eprintln!("{}", Cli::command().render_help());
        process::exit(EXIT_ERROR);
    };

    match run(&cli, input) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(EXIT_ERROR);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, input: &Path) -> Result<i32> {
    let source = resolve_path(input);
    let base_dir = resolve_path(&cli.dir);

    let file_config = NeopixConfig::load(&base_dir)?;
    let overrides = RunOverrides {
        threshold: cli.threshold,
        mode: cli.mode.clone(),
        strict: cli.strict,
    };
    let config = RunConfig::resolve(&base_dir, &file_config, &overrides)?;
    log::info!("Comparing {} in {}", source.display(), base_dir.display());

    let store = FileStore::new(config.layout.clone());
    let mut api = NeopixApi::new(store, ImageCompareEngine::new(), config);
    let result = api.check(&source)?;

    print_messages(&result.messages);
    Ok(result.outcome.map_or(0, |outcome| outcome.exit_code()))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
