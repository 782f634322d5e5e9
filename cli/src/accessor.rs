// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read side of the calendar: fetches the event list and keeps it for rendering.

use calboard_client::{CalendarEvent, ClientError};

use crate::service::EventService;

/// Cache identity of the calendar event list.
pub const CALENDAR_EVENTS_KEY: &str = "calendarEvents";

/// What the rendering surface gets to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventsData {
    /// Nothing resolved yet.
    #[default]
    Loading,

    /// The last successfully fetched list.
    Loaded(Vec<CalendarEvent>),

    /// The fetch failed and there is no earlier list to fall back to.
    Absent,
}

/// Identifies one issued fetch, so that only the newest one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// The resolution of a fetch, ready to be handed back to [`EventAccessor::resolve`].
#[derive(Debug)]
pub struct Fetched {
    pub ticket: FetchTicket,
    pub result: Result<Vec<CalendarEvent>, ClientError>,
}

/// Fetches the calendar event list once per key and on explicit invalidation.
#[derive(Debug, Default)]
pub struct EventAccessor {
    key: Option<String>,
    data: EventsData,
    issued: u64,
    in_flight: Option<FetchTicket>,
}

impl EventAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates the accessor under `key`. A fetch is only requested when the
    /// key differs from the one of the previous activation.
    pub fn activate(&mut self, key: &str) -> Option<FetchTicket> {
        if self.key.as_deref() == Some(key) {
            return None;
        }

        tracing::debug!(key, "activating event accessor");
        self.key = Some(key.to_owned());
        self.data = EventsData::Loading;
        Some(self.issue())
    }

    /// Marks the cached list as stale and requests a new fetch for the current key.
    pub fn invalidate(&mut self) -> Option<FetchTicket> {
        match self.key {
            Some(_) => Some(self.issue()),
            None => None,
        }
    }

    /// Applies a fetch result. Returns `false` if the ticket was superseded.
    pub fn resolve(&mut self, fetched: Fetched) -> bool {
        if self.in_flight != Some(fetched.ticket) {
            tracing::debug!(ticket = ?fetched.ticket, "dropping superseded fetch");
            return false;
        }

        self.in_flight = None;
        match fetched.result {
            Ok(events) => self.data = EventsData::Loaded(events),
            Err(err) => {
                tracing::warn!(%err, "failed to fetch calendar events");
                if !matches!(self.data, EventsData::Loaded(_)) {
                    self.data = EventsData::Absent;
                }
            }
        }
        true
    }

    pub fn data(&self) -> &EventsData {
        &self.data
    }

    pub fn events(&self) -> Option<&[CalendarEvent]> {
        match &self.data {
            EventsData::Loaded(events) => Some(events),
            EventsData::Loading | EventsData::Absent => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.in_flight = Some(ticket);
        ticket
    }
}

/// Performs the read request for `ticket`.
pub async fn fetch(service: &dyn EventService, ticket: FetchTicket) -> Fetched {
    let result = service.list_events().await;
    Fetched { ticket, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::MockService;

    fn event_a() -> CalendarEvent {
        CalendarEvent {
            title: "A".to_string(),
            start: "2024-01-01T10:00".to_string(),
            end: "2024-01-01T11:00".to_string(),
            all_day: false,
        }
    }

    #[test]
    fn fetches_once_per_key() {
        let mut accessor = EventAccessor::new();
        assert!(accessor.activate(CALENDAR_EVENTS_KEY).is_some());
        assert!(accessor.activate(CALENDAR_EVENTS_KEY).is_none());
        assert!(accessor.activate("otherKey").is_some());
    }

    #[test]
    fn loading_until_resolved() {
        let mut accessor = EventAccessor::new();
        accessor.activate(CALENDAR_EVENTS_KEY);
        assert_eq!(accessor.data(), &EventsData::Loading);
        assert_eq!(accessor.events(), None);
        assert!(accessor.is_fetching());
    }

    #[tokio::test]
    async fn exposes_exactly_the_fetched_list() {
        let service = MockService::default().with_list(Ok(vec![event_a()]));
        let mut accessor = EventAccessor::new();

        let ticket = accessor.activate(CALENDAR_EVENTS_KEY).unwrap();
        assert!(accessor.resolve(fetch(&service, ticket).await));

        assert_eq!(accessor.events(), Some(&[event_a()][..]));
        assert!(!accessor.is_fetching());
        assert_eq!(service.list_calls(), 1);
    }

    #[tokio::test]
    async fn read_failure_yields_absent_data() {
        let service =
            MockService::default().with_list(Err(ClientError::Network("offline".to_string())));
        let mut accessor = EventAccessor::new();

        let ticket = accessor.activate(CALENDAR_EVENTS_KEY).unwrap();
        accessor.resolve(fetch(&service, ticket).await);

        assert_eq!(accessor.data(), &EventsData::Absent);
        assert_eq!(service.list_calls(), 1, "read failures are not retried");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_list() {
        let service = MockService::default()
            .with_list(Ok(vec![event_a()]))
            .with_list(Err(ClientError::Network("offline".to_string())));
        let mut accessor = EventAccessor::new();

        let ticket = accessor.activate(CALENDAR_EVENTS_KEY).unwrap();
        accessor.resolve(fetch(&service, ticket).await);
        let ticket = accessor.invalidate().unwrap();
        accessor.resolve(fetch(&service, ticket).await);

        assert_eq!(accessor.events(), Some(&[event_a()][..]));
    }

    #[test]
    fn superseded_fetch_is_ignored() {
        let mut accessor = EventAccessor::new();
        let first = accessor.activate(CALENDAR_EVENTS_KEY).unwrap();
        let second = accessor.invalidate().unwrap();

        assert!(!accessor.resolve(Fetched {
            ticket: first,
            result: Ok(vec![event_a()]),
        }));
        assert_eq!(accessor.data(), &EventsData::Loading);

        assert!(accessor.resolve(Fetched {
            ticket: second,
            result: Ok(Vec::new()),
        }));
        assert_eq!(accessor.events(), Some(&[][..]));
    }

    #[test]
    fn invalidate_before_activation_does_nothing() {
        let mut accessor = EventAccessor::new();
        assert!(accessor.invalidate().is_none());
    }
}
