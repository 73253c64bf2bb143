// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use dayprint_core::{APP_NAME, ScheduleBuilder};
use jiff::Timestamp;
use tracing_subscriber::EnvFilter;

use crate::config::parse_config;
use crate::print::print_document;
use crate::render::write_schedule;

/// Run the dayprint command-line interface.
pub async fn run() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);
    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Date expression, today when absent
    pub date: Option<String>,

    /// Send the document to the printer after saving
    pub print: bool,

    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Directory to write the document to, overriding the configuration
    pub output_dir: Option<PathBuf>,

    /// Show debug logs
    pub verbose: bool,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Print a single-day meeting schedule from a CalDAV calendar.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .after_help(
                "\
Date examples:
  -d 0            Today
  -d -1           Yesterday
  -d +1           Tomorrow
  -d 15.11.2025   15 November 2025
  -d 15.11.25     15 November 2025
  -d 15.11        15 November of the current year",
            )
            .arg(
                arg!(-d --date <DATE> "Day to print, today by default")
                    .allow_hyphen_values(true),
            )
            .arg(arg!(-p --print "Send the document to the default printer after saving"))
            .arg(
                arg!(-c --config <CONFIG> "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $DAYPRINT_CONFIG; without either, settings are read \
from the environment and a .env file.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(-o --"output-dir" <DIR> "Directory to write the document to")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::DirPath),
            )
            .arg(arg!(-v --verbose "Show debug logs"))
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let matches = Self::command().get_matches();
        Ok(Self::from(&matches))
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from(&matches))
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one::<String>("date").cloned(),
            print: matches.get_flag("print"),
            config: matches.get_one("config").cloned(),
            output_dir: matches.get_one("output-dir").cloned(),
            verbose: matches.get_flag("verbose"),
        }
    }

    /// Build the schedule, write the document and optionally print it
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("parsing configuration");
        let (core, mut output) = parse_config(self.config).await?;
        if let Some(dir) = self.output_dir {
            output.dir = dir;
        }

        let builder = ScheduleBuilder::from_config(&core).await?;
        let today = core.utc_offset.to_local(Timestamp::now()).date();
        let schedule = builder
            .build(self.date.as_deref().unwrap_or_default(), today)
            .await?;
        println!(
            "Found {} meeting(s) on {}",
            schedule.rows.len(),
            schedule.date.strftime("%d.%m.%Y")
        );

        let path = write_schedule(&schedule, &output).await?;
        println!("Schedule saved to: {}", path.display());

        if self.print {
            match print_document(&path).await {
                Ok(()) => println!("Document sent to the default printer"),
                Err(e) => println!(
                    "{} {e}; the document was saved but not printed",
                    "Warning:".yellow()
                ),
            }
        }
        Ok(())
    }
}
