// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! dayprint - print a single-day meeting schedule from a CalDAV calendar

use std::process::ExitCode;

use dayprint_cli::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run().await
}
