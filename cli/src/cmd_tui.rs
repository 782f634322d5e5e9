// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The calendar command, which hands the terminal over to the TUI.

use std::{error::Error, sync::Arc};

use clap::{ArgMatches, Command};

use crate::config::UiConfig;
use crate::service::EventService;
use crate::tui;

#[derive(Debug, Clone, Copy)]
pub struct CmdCalendar;

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Browse the calendar and add events in the TUI")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(
        self,
        service: Arc<dyn EventService>,
        ui: &UiConfig,
    ) -> Result<(), Box<dyn Error>> {
        tracing::debug!("starting calendar view...");
        tui::run_calendar(service, ui).await
    }
}
