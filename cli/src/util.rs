// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Arg, ArgMatches, arg, value_parser};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Formats accepted by the date-time inputs, the shape of an HTML `datetime-local` value.
const FORM_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parses a date-time typed into the event form.
pub fn parse_form_datetime(s: &str) -> Option<NaiveDateTime> {
    FORM_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parses a date-time as sent by the event service, which is less strict than
/// the form: RFC 3339 timestamps are shown in local time and bare dates start
/// at midnight.
pub fn parse_event_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = parse_form_datetime(s) {
        Some(dt)
    } else if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        Some(dt.with_timezone(&Local).naive_local())
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        Some(dt)
    } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Some(date.and_time(NaiveTime::MIN))
    } else {
        tracing::debug!(value = s, "unrecognized event date-time");
        None
    }
}

/// Formats a date and time the way the form inputs expect them.
pub fn format_form_datetime(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format("%Y-%m-%dT%H:%M").to_string()
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn unicode_width_of_slice(s: &str, first_n_chars: usize) -> usize {
    if first_n_chars == 0 || s.is_empty() {
        0
    } else if let Some((idx, ch)) = s.char_indices().nth(first_n_chars - 1) {
        let byte_idx = idx + ch.len_utf8();
        s[..byte_idx].width()
    } else {
        s.width()
    }
}

/// Cuts `s` so that it fits into `width` terminal columns.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_owned();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w + 1 > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}
