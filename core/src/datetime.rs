// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod offset;
mod spec;

pub use offset::{DayWindow, UtcOffset};
pub use spec::{DateSpec, resolve_date};
