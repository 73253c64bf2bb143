// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use dayprint_core::{
    CalendarConfig, Config as CoreConfig, DirectoryConfig, UtcOffset, default_meeting_rooms_file,
    default_timeout,
};
use tokio::fs;

const DAYPRINT_CONFIG_ENV: &str = "DAYPRINT_CONFIG";

const CALDAV_URL: &str = "CALDAV_URL";
const CALDAV_USERNAME: &str = "CALDAV_USERNAME";
const CALDAV_PASSWORD: &str = "CALDAV_PASSWORD";
const CALDAV_CALENDAR: &str = "CALDAV_CALENDAR";
const CARDDAV_URL: &str = "CARDDAV_URL";
const CARDDAV_USERNAME: &str = "CARDDAV_USERNAME";
const CARDDAV_PASSWORD: &str = "CARDDAV_PASSWORD";
const TIMEZONE_OFFSET: &str = "TIMEZONE_OFFSET";
const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
const MEETING_ROOMS_FILE: &str = "MEETING_ROOMS_FILE";
const DOCUMENT_TITLE: &str = "DOCUMENT_TITLE";
const OUTPUT_PATH: &str = "OUTPUT_PATH";
const FILENAME_PREFIX: &str = "FILENAME_PREFIX";

/// Loads the configuration from `path`, else from `$DAYPRINT_CONFIG`, else
/// from the environment after reading a `.env` file.
#[tracing::instrument]
pub async fn parse_config(
    path: Option<PathBuf>,
) -> Result<(CoreConfig, OutputConfig), Box<dyn Error>> {
    let path = path.or_else(|| std::env::var_os(DAYPRINT_CONFIG_ENV).map(PathBuf::from));
    let (core, output) = match path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .await
                .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
                .parse::<ConfigRaw>()
                .map_err(|e| format!("Invalid config file {}: {}", path.display(), e))?;
            (raw.core, raw.output)
        }
        None => {
            load_dotenv();
            from_env(|name| std::env::var(name).ok())?
        }
    };

    core.validate()?;
    Ok((core, output))
}

/// Where and how the document is written.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct OutputConfig {
    /// Directory the document is written to, created if missing.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Prepended to `DD.MM.YY.docx`.
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,

    /// Heading of the document.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            filename_prefix: default_filename_prefix(),
            title: default_title(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_filename_prefix() -> String {
    "schedule_".to_string()
}

fn default_title() -> String {
    "Schedule".to_string()
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    core: CoreConfig,

    #[serde(default)]
    output: OutputConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }
}

/// Reads the settings from variables looked up with `var`. Empty values
/// count as unset.
fn from_env<F>(var: F) -> Result<(CoreConfig, OutputConfig), Box<dyn Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());
    let required =
        |name: &str| var(name).ok_or_else(|| format!("{name} is not set in the environment"));

    let timeout_secs = match var(REQUEST_TIMEOUT) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {REQUEST_TIMEOUT} '{v}': {e}"))?,
        None => default_timeout(),
    };

    let mut core = CoreConfig::new(CalendarConfig {
        url: required(CALDAV_URL)?,
        username: required(CALDAV_USERNAME)?,
        password: required(CALDAV_PASSWORD)?,
        calendar: var(CALDAV_CALENDAR),
        timeout_secs,
    });

    if let Some(offset) = var(TIMEZONE_OFFSET) {
        core.utc_offset = offset.parse::<UtcOffset>()?;
    }
    core.meeting_rooms_file = var(MEETING_ROOMS_FILE)
        .map(PathBuf::from)
        .unwrap_or_else(default_meeting_rooms_file);
    core.directory = var(CARDDAV_URL).map(|url| DirectoryConfig {
        url,
        username: var(CARDDAV_USERNAME),
        password: var(CARDDAV_PASSWORD),
    });

    let output = OutputConfig {
        dir: var(OUTPUT_PATH).map_or_else(default_dir, PathBuf::from),
        filename_prefix: var(FILENAME_PREFIX).unwrap_or_else(default_filename_prefix),
        title: var(DOCUMENT_TITLE).unwrap_or_else(default_title),
    };
    Ok((core, output))
}
