// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the `/calendar` resource.

use std::sync::Arc;

use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{CalendarEvent, CreateEventResponse, ListEventsResponse};

const CALENDAR_PATH: &str = "/calendar";

/// Client for listing and creating events on the event service.
///
/// # Example
///
/// ```ignore
/// use calboard_client::{CalendarClient, ClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig {
///     base_url: "https://api.example.com".to_string(),
///     ..Default::default()
/// };
///
/// let client = CalendarClient::new(config)?;
/// let events = client.list_events().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CalendarClient {
    http: Arc<HttpClient>,
}

impl CalendarClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable or HTTP client
    /// initialization fails.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Fetches every event of the calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the
    /// body carries no `payload`.
    pub async fn list_events(&self) -> Result<Vec<CalendarEvent>, ClientError> {
        tracing::debug!("fetching calendar events");
        let resp = self
            .http
            .execute(self.http.build_request(Method::GET, CALENDAR_PATH))
            .await?;

        let body = resp.text().await?;
        let envelope: ListEventsResponse = serde_json::from_str(&body)?;
        let events = envelope
            .payload
            .ok_or_else(|| ClientError::InvalidResponse("missing payload".to_string()))?;

        tracing::debug!(count = events.len(), "calendar events fetched");
        Ok(events)
    }

    /// Creates an event.
    ///
    /// A response with `success: false` is returned as-is; it is up to the
    /// caller to decide what a refused creation means.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with an
    /// error status code.
    pub async fn create_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CreateEventResponse, ClientError> {
        tracing::debug!(title = %event.title, "creating calendar event");
        let resp = self
            .http
            .execute(
                self.http
                    .build_request(Method::POST, CALENDAR_PATH)
                    .json(event),
            )
            .await?;

        let body = resp.text().await?;
        let created = if body.trim().is_empty() {
            CreateEventResponse::default()
        } else {
            serde_json::from_str(&body)?
        };

        tracing::debug!(success = created.success, "calendar event submitted");
        Ok(created)
    }
}
