// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use calboard_client::CalendarEvent;
use chrono::NaiveDateTime;
use colored::Color;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{ArgOutputFormat, format_datetime, parse_event_datetime};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            columns: vec![
                EventColumn::TimeRange(now),
                EventColumn::AllDay,
                EventColumn::Title,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [CalendarEvent]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [CalendarEvent],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Title,
    AllDay,
    /// Start and end, dimmed once the event is over at the given instant.
    TimeRange(NaiveDateTime),
}

impl TableColumn<CalendarEvent> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Title => "Title",
            EventColumn::AllDay => "All Day",
            EventColumn::TimeRange(_) => "Time Range",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a CalendarEvent) -> Cow<'a, str> {
        match self {
            EventColumn::Title => event.title.as_str().into(),
            EventColumn::AllDay => match event.all_day {
                true => "yes".into(),
                false => "".into(),
            },
            EventColumn::TimeRange(_) => format_time_range(event).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, event: &CalendarEvent) -> Option<Color> {
        match self {
            EventColumn::TimeRange(now) => match parse_event_datetime(&event.end) {
                Some(end) if end < *now => Some(Color::BrightBlack),
                _ => None,
            },
            _ => None,
        }
    }
}

fn format_time_range(event: &CalendarEvent) -> String {
    match (
        parse_event_datetime(&event.start),
        parse_event_datetime(&event.end),
    ) {
        (Some(start), Some(end)) if event.all_day => {
            match start.date() == end.date() {
                true => start.date().format("%Y-%m-%d").to_string(),
                false => format!(
                    "{}~{}",
                    start.date().format("%Y-%m-%d"),
                    end.date().format("%Y-%m-%d")
                ),
            }
        }
        (Some(start), Some(end)) => match start.date() == end.date() {
            true => format!(
                "{} {}~{}",
                start.date().format("%Y-%m-%d"),
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
            false => format!("{}~{}", format_datetime(start), format_datetime(end)),
        },
        // Values the service sent but nobody can read are shown as they are
        _ => format!("{}~{}", event.start, event.end),
    }
}
