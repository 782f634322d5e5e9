// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calboard_client::CalendarEvent;
use chrono::Local;
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::config::UiConfig;
use crate::creation::{CreationFlow, create};
use crate::event_formatter::EventFormatter;
use crate::notification::NotificationKind;
use crate::service::EventService;
use crate::util::{ArgOutputFormat, parse_event_datetime, parse_form_datetime};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(arg!(title: <TITLE> "Title of the event"))
            .arg(arg!(--start <START> "Start of the event, e.g. 2025-01-01T09:00").required(true))
            .arg(arg!(--end <END> "End of the event, e.g. 2025-01-01T10:00").required(true))
            .arg(arg!(--"all-day" "Mark the event as lasting all day"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
        Self {
            title: get("title"),
            start: get("start"),
            end: get("end"),
            all_day: matches.get_flag("all-day"),
        }
    }

    pub async fn run(self, service: &dyn EventService, ui: &UiConfig) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let mut flow = CreationFlow::new(ui.notification_timeout());
        flow.select_slot(Local::now().date_naive());
        flow.edit(|form| {
            form.title = self.title;
            form.start = normalize_datetime(self.start);
            form.end = normalize_datetime(self.end);
            form.all_day = self.all_day;
        });

        let submission = flow.submit()?;
        let event = submission.event.clone();
        let outcome = flow.complete(create(service, submission).await);
        match outcome.notification {
            Some(n) if n.kind == NotificationKind::Success => {
                println!("{} {}", "Success:".green(), n.text);
                print_events(&[event], ArgOutputFormat::Table);
                Ok(())
            }
            Some(n) => Err(n.text.into()),
            None => {
                println!(
                    "{} The event service did not accept the event",
                    "Warning:".yellow()
                );
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub output_format: ArgOutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, service: &dyn EventService) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let events = service.list_events().await?;
        if events.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&events, self.output_format);
        Ok(())
    }
}

/// Rewrites any other date-time the service understands into the form input
/// shape. Form-shaped values pass through as typed and unreadable ones are
/// left for the form to reject.
fn normalize_datetime(value: String) -> String {
    if parse_form_datetime(&value).is_some() {
        return value;
    }

    match parse_event_datetime(&value) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M").to_string(),
        None => value,
    }
}

fn print_events(events: &[CalendarEvent], output_format: ArgOutputFormat) {
    let formatter =
        EventFormatter::new(Local::now().naive_local()).with_output_format(output_format);
    print!("{}", formatter.format(events));
}
