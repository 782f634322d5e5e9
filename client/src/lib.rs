// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the calboard event service.
//!
//! The service exposes a single `/calendar` resource: `GET` returns the event
//! list wrapped in a `payload` envelope, `POST` creates an event and answers
//! with a `success` flag.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::single_match_else, clippy::match_bool)]

mod client;
mod config;
mod error;
mod http;
mod types;

pub use crate::client::CalendarClient;
pub use crate::config::{AuthMethod, ClientConfig};
pub use crate::error::ClientError;
pub use crate::types::{CalendarEvent, CreateEventResponse, ListEventsResponse};
