// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod config;
mod print;
mod render;

pub use crate::cli::{Cli, run};
pub use crate::config::{OutputConfig, parse_config};
pub use crate::print::{PrintError, print_document};
pub use crate::render::{RenderError, file_name, schedule_document, write_schedule};
