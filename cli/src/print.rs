// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use tokio::process::Command;

/// Failure to hand a document to the printer. The document itself is
/// left in place.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("printing is not available: `{0}` not found")]
    Unavailable(String),

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Sends `path` to the default printer: `Start-Process -Verb Print` on
/// Windows, `lp` elsewhere.
#[tracing::instrument]
pub async fn print_document(path: &Path) -> Result<(), PrintError> {
    let (program, args) = if cfg!(windows) {
        ("powershell", powershell_args(path))
    } else {
        ("lp", vec![path.as_os_str().to_owned()])
    };
    run(program, &args).await
}

async fn run(program: &str, args: &[OsString]) -> Result<(), PrintError> {
    let executable = find(program)?;
    tracing::debug!(executable = %executable.display(), "starting print command");

    let status = Command::new(&executable)
        .args(args)
        .status()
        .await
        .map_err(|source| PrintError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(PrintError::Failed {
            program: program.to_string(),
            status,
        })
    }
}

fn find(program: &str) -> Result<PathBuf, PrintError> {
    which::which(program).map_err(|e| {
        tracing::debug!(error = %e, program, "print command not found");
        PrintError::Unavailable(program.to_string())
    })
}

fn powershell_args(path: &Path) -> Vec<OsString> {
    // single quotes are doubled inside a PowerShell literal
    let path = path.display().to_string().replace('\'', "''");
    vec![
        "-NoProfile".into(),
        "-NonInteractive".into(),
        "-Command".into(),
        format!("Start-Process -FilePath '{path}' -Verb Print").into(),
    ]
}
