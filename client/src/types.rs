// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire types of the `/calendar` resource.

use serde::{Deserialize, Serialize};

/// A calendar entry as exchanged with the event service.
///
/// `start` and `end` are kept as the strings the form or the server produced;
/// they are sent back verbatim and never reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Event title.
    pub title: String,
    /// Start date-time.
    pub start: String,
    /// End date-time.
    pub end: String,
    /// Whether the event lasts the whole day.
    #[serde(default)]
    pub all_day: bool,
}

/// Envelope of `GET /calendar`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListEventsResponse {
    /// The events, absent when the server did not send any.
    #[serde(default)]
    pub payload: Option<Vec<CalendarEvent>>,
}

/// Answer of `POST /calendar`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateEventResponse {
    /// Whether the server accepted the event. A missing flag counts as `false`.
    #[serde(default)]
    pub success: bool,

    /// Any other fields the server sent along.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
