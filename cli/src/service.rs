// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use calboard_client::{CalendarClient, CalendarEvent, ClientError, CreateEventResponse};

/// The remote event store, as seen by the calendar board.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Reads the full event list.
    async fn list_events(&self) -> Result<Vec<CalendarEvent>, ClientError>;

    /// Writes one new event.
    async fn create_event(&self, event: &CalendarEvent)
    -> Result<CreateEventResponse, ClientError>;
}

#[async_trait]
impl EventService for CalendarClient {
    async fn list_events(&self) -> Result<Vec<CalendarEvent>, ClientError> {
        CalendarClient::list_events(self).await
    }

    async fn create_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CreateEventResponse, ClientError> {
        CalendarClient::create_event(self, event).await
    }
}
