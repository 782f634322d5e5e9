// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod accessor;
mod cli;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_tui;
mod config;
mod creation;
mod event_formatter;
mod logging;
mod notification;
mod service;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, UiConfig};
pub use crate::service::EventService;
