//! Command-line interface of QTaper.

use std::path::{Path, PathBuf};

use anyhow::{self, format_err};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::interfaces::input::Input;
use crate::interfaces::InputHandle;
use crate::io::format::{qtaper_error, qtaper_output};
use crate::io::{read_qtaper_yaml, write_qtaper_yaml};

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted QTaper heading to the `qtaper-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    qtaper_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    qtaper_output!("│                                                                                                     │");
    qtaper_output!("│     ████████  ████████  ██████   ██████   ██████  ████████                                          │");
    qtaper_output!("│     ██    ██     ██    ██    ██  ██   ██  ██      ██    ██                                          │");
    qtaper_output!("│     ██    ██     ██    ████████  ██████   █████   ████████                                          │");
    qtaper_output!("│     ██  ████     ██    ██    ██  ██       ██      ██   ██                                           │");
    qtaper_output!("│     ████████     ██    ██    ██  ██       ██████  ██    ██                                          │");
    qtaper_output!("│           ██                                                                                        │");
    qtaper_output!("│                                         Qubit tapering of Pauli Hamiltonians by Z2 symmetries       │");
    qtaper_output!("│                                                                                     {version:>15} │");
    qtaper_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    qtaper_output!("");
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML input file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to a file receiving the main output. If absent, the main output is written to the
    /// terminal.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Writes a template YAML input file with default values under this name (without
    /// extension) and exits.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Increases the verbosity of diagnostic messages on standard error. May be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Runs the program as requested on the command line. The loggers must have been set up
    /// beforehand, *e.g.* with [`setup_logger`]. Errors are logged before being returned.
    pub fn execute(&self) -> Result<(), anyhow::Error> {
        self.dispatch().map_err(|err| {
            qtaper_error!("{err:#}");
            err
        })
    }

    fn dispatch(&self) -> Result<(), anyhow::Error> {
        if let Some(name) = self.template.as_ref() {
            write_qtaper_yaml(name, &Input::default())?;
            qtaper_output!("Template input written to {}.yml.", name.display());
            return Ok(());
        }

        let config = self
            .config
            .as_ref()
            .ok_or_else(|| format_err!("No input file has been specified."))?;
        log_heading();
        let input = read_qtaper_yaml::<Input, _>(config)?;
        input.handle()
    }
}

/// Sets up the loggers: the `qtaper-output` logger writes bare lines to `output` (or to standard
/// output if `output` is `None`), and all other messages go to standard error at a level that
/// increases with `verbosity`.
pub fn setup_logger(
    output: Option<&Path>,
    verbosity: u8,
) -> Result<log4rs::Handle, anyhow::Error> {
    let output_appender: Box<dyn Append> = match output {
        Some(path) => Box::new(
            FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .append(false)
                .build(path)?,
        ),
        None => Box::new(
            ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .build(),
        ),
    };
    let diagnostic_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l:<5})} {t}: {m}{n}")))
        .build();
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = Config::builder()
        .appender(Appender::builder().build("output", output_appender))
        .appender(Appender::builder().build("stderr", Box::new(diagnostic_appender)))
        .logger(
            Logger::builder()
                .appender("output")
                .additive(false)
                .build("qtaper-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(log4rs::init_config(config)?)
}
