// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc, time::Duration, time::Instant};

use calboard_client::CalendarEvent;
use chrono::{Months, NaiveDate, TimeDelta};

use crate::accessor::{CALENDAR_EVENTS_KEY, EventAccessor, FetchTicket, Fetched};
use crate::creation::{Completed, CreationFlow, Submission};
use crate::notification::Notification;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::parse_event_datetime;

/// Network work the store asks the surface to carry out.
#[derive(Debug)]
pub enum Request {
    Fetch(FetchTicket),
    Create(Submission),
}

#[derive(Debug)]
pub struct CalendarStore {
    pub accessor: EventAccessor,
    pub flow: CreationFlow,
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    pub notification: Option<Notification>,
    requests: Vec<Request>,
}

impl CalendarStore {
    pub fn new(today: NaiveDate, notification_timeout: Duration) -> Self {
        Self {
            accessor: EventAccessor::new(),
            flow: CreationFlow::new(notification_timeout),
            cursor: today,
            today,
            notification: None,
            requests: Vec::new(),
        }
    }

    /// Activates the event list; the first mount issues the read request.
    pub fn mount(&mut self) {
        if let Some(ticket) = self.accessor.activate(CALENDAR_EVENTS_KEY) {
            self.requests.push(Request::Fetch(ticket));
        }
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    pub fn on_fetched(&mut self, fetched: Fetched) {
        self.accessor.resolve(fetched);
    }

    pub fn on_completed(&mut self, done: Completed) {
        let outcome = self.flow.complete(done);
        if let Some(notification) = outcome.notification {
            self.notification = Some(notification);
        }
        if outcome.refresh {
            self.refresh();
        }
    }

    /// Drops the notification once it timed out. Returns whether it did.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        match &self.notification {
            Some(n) if n.is_expired(now) => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }

    /// Events spanning the given day, in list order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.accessor
            .events()
            .unwrap_or_default()
            .iter()
            .filter(|event| occurs_on(event, date))
            .collect()
    }

    fn refresh(&mut self) {
        if let Some(ticket) = self.accessor.invalidate() {
            self.requests.push(Request::Fetch(ticket));
        }
    }

    fn select_slot(&mut self) {
        let date = self.cursor;
        self.flow.select_slot(date);
    }

    fn submit(&mut self) {
        match self.flow.submit() {
            Ok(submission) => self.requests.push(Request::Create(submission)),
            Err(err) => tracing::debug!(%err, "event form not submitted"),
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::MoveCursor(days) => {
                    if let Some(date) = that.cursor.checked_add_signed(TimeDelta::days(*days)) {
                        that.cursor = date;
                    }
                }
                Action::MoveMonth(months) => {
                    let months_abs = Months::new(months.unsigned_abs());
                    let date = match *months >= 0 {
                        true => that.cursor.checked_add_months(months_abs),
                        false => that.cursor.checked_sub_months(months_abs),
                    };
                    if let Some(date) = date {
                        that.cursor = date;
                    }
                }
                Action::GoToday => {
                    let today = that.today;
                    that.cursor = today;
                }
                Action::SelectSlot => that.select_slot(),
                Action::Refresh => that.refresh(),
                Action::CancelEvent => {
                    that.flow.cancel();
                }
                Action::UpdateEventTitle(v) => {
                    that.flow.edit(|form| form.title = v.clone());
                }
                Action::UpdateEventStart(v) => {
                    that.flow.edit(|form| form.start = v.clone());
                }
                Action::UpdateEventEnd(v) => {
                    that.flow.edit(|form| form.end = v.clone());
                }
                Action::UpdateEventAllDay(v) => {
                    that.flow.edit(|form| form.all_day = *v);
                }
                Action::SubmitEvent => that.submit(),
            }
        }));
        dispatcher.register(callback);
    }
}

fn occurs_on(event: &CalendarEvent, date: NaiveDate) -> bool {
    let Some(start) = parse_event_datetime(&event.start) else {
        return false;
    };

    let end = parse_event_datetime(&event.end)
        .filter(|end| *end >= start)
        .unwrap_or(start);

    // An end at midnight belongs to the previous day.
    let last_day = if end.date() > start.date() && end.time() == chrono::NaiveTime::MIN {
        end.date().pred_opt().unwrap_or(end.date())
    } else {
        end.date()
    };

    start.date() <= date && date <= last_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::EventsData;
    use crate::creation::{Completion, ModalState, create};
    use crate::notification::NotificationKind;
    use crate::service::testing::{MockService, success};
    use calboard_client::ClientError;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn event(title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            all_day: false,
        }
    }

    fn new_store() -> (Rc<RefCell<CalendarStore>>, Dispatcher) {
        let store = Rc::new(RefCell::new(CalendarStore::new(
            day(15),
            Duration::from_secs(1),
        )));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher)
    }

    fn fetch_ticket(requests: Vec<Request>) -> FetchTicket {
        match requests.as_slice() {
            [Request::Fetch(ticket)] => *ticket,
            other => panic!("Expected a single fetch, got {other:?}"),
        }
    }

    #[test]
    fn mount_fetches_once() {
        let (store, _) = new_store();
        store.borrow_mut().mount();
        store.borrow_mut().mount();
        assert_eq!(store.borrow_mut().take_requests().len(), 1);
    }

    #[test]
    fn cursor_moves_by_day_and_month() {
        let (store, mut dispatcher) = new_store();
        dispatcher.dispatch(Action::MoveCursor(-7));
        assert_eq!(store.borrow().cursor, day(8));
        dispatcher.dispatch(Action::MoveMonth(1));
        assert_eq!(store.borrow().cursor, NaiveDate::from_ymd_opt(2024, 2, 8).unwrap());
        dispatcher.dispatch(Action::MoveMonth(-2));
        assert_eq!(store.borrow().cursor, NaiveDate::from_ymd_opt(2023, 12, 8).unwrap());
        dispatcher.dispatch(Action::GoToday);
        assert_eq!(store.borrow().cursor, day(15));
    }

    #[test]
    fn select_slot_opens_form_for_cursor_day() {
        let (store, mut dispatcher) = new_store();
        dispatcher.dispatch(Action::MoveCursor(1));
        dispatcher.dispatch(Action::SelectSlot);

        let store = store.borrow();
        assert_eq!(store.flow.state(), ModalState::Open);
        assert_eq!(store.flow.form().start, "2024-01-16T09:00");
    }

    #[test]
    fn form_updates_reach_the_flow() {
        let (store, mut dispatcher) = new_store();
        dispatcher.dispatch(Action::SelectSlot);
        dispatcher.dispatch(Action::UpdateEventTitle("Review".to_string()));
        dispatcher.dispatch(Action::UpdateEventAllDay(true));
        dispatcher.dispatch(Action::SubmitEvent);

        let requests = store.borrow_mut().take_requests();
        match requests.as_slice() {
            [Request::Create(submission)] => {
                assert_eq!(submission.event.title, "Review");
                assert!(submission.event.all_day);
            }
            other => panic!("Expected a single create, got {other:?}"),
        }
    }

    #[test]
    fn invalid_submit_sends_nothing() {
        let (store, mut dispatcher) = new_store();
        dispatcher.dispatch(Action::SelectSlot);
        dispatcher.dispatch(Action::SubmitEvent);

        assert!(store.borrow_mut().take_requests().is_empty());
        assert_eq!(store.borrow().flow.state(), ModalState::Open);
    }

    #[test]
    fn cancel_closes_form() {
        let (store, mut dispatcher) = new_store();
        dispatcher.dispatch(Action::SelectSlot);
        dispatcher.dispatch(Action::CancelEvent);
        assert_eq!(store.borrow().flow.state(), ModalState::Closed);
    }

    #[tokio::test]
    async fn successful_create_refreshes_the_list() {
        let service = MockService::default()
            .with_list(Ok(vec![]))
            .with_create(Ok(success()))
            .with_list(Ok(vec![event("Review", "2024-01-15T09:00", "2024-01-15T10:00")]));
        let (store, mut dispatcher) = new_store();

        store.borrow_mut().mount();
        let ticket = fetch_ticket(store.borrow_mut().take_requests());
        let fetched = crate::accessor::fetch(&service, ticket).await;
        store.borrow_mut().on_fetched(fetched);
        assert_eq!(store.borrow().accessor.data(), &EventsData::Loaded(vec![]));

        dispatcher.dispatch(Action::SelectSlot);
        dispatcher.dispatch(Action::UpdateEventTitle("Review".to_string()));
        dispatcher.dispatch(Action::SubmitEvent);
        let submission = match store.borrow_mut().take_requests().pop() {
            Some(Request::Create(submission)) => submission,
            other => panic!("Expected a create, got {other:?}"),
        };
        let done = create(&service, submission).await;
        store.borrow_mut().on_completed(done);

        let ticket = fetch_ticket(store.borrow_mut().take_requests());
        let fetched = crate::accessor::fetch(&service, ticket).await;
        store.borrow_mut().on_fetched(fetched);

        let store = store.borrow();
        assert_eq!(store.flow.state(), ModalState::Closed);
        assert_eq!(
            store.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Success)
        );
        assert_eq!(store.events_on(day(15)).len(), 1);
        assert_eq!(service.list_calls(), 2);
    }

    #[test]
    fn failed_create_does_not_refresh() {
        let (store, mut dispatcher) = new_store();
        store.borrow_mut().mount();
        store.borrow_mut().take_requests();

        dispatcher.dispatch(Action::SelectSlot);
        dispatcher.dispatch(Action::UpdateEventTitle("Review".to_string()));
        dispatcher.dispatch(Action::SubmitEvent);
        let submission = match store.borrow_mut().take_requests().pop() {
            Some(Request::Create(submission)) => submission,
            other => panic!("Expected a create, got {other:?}"),
        };

        store.borrow_mut().on_completed(Completed {
            session: submission.session,
            completion: Completion::Failed(ClientError::Network("Network Error".to_string())),
        });

        let mut store = store.borrow_mut();
        assert!(store.take_requests().is_empty());
        let notification = store.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.text.contains("Network Error"));
    }

    #[test]
    fn notification_expires() {
        let (store, _) = new_store();
        let mut store = store.borrow_mut();
        store.notification = Some(Notification::success("ok", Duration::from_secs(1)));
        let shown_at = store.notification.as_ref().unwrap().shown_at;

        assert!(!store.expire_notification(shown_at));
        assert!(store.expire_notification(shown_at + Duration::from_secs(2)));
        assert!(store.notification.is_none());
    }

    #[test]
    fn events_span_their_days() {
        let single = event("A", "2024-01-01T10:00", "2024-01-01T11:00");
        assert!(occurs_on(&single, day(1)));
        assert!(!occurs_on(&single, day(2)));

        let multi = event("Trip", "2024-01-03T08:00", "2024-01-05T18:00");
        assert!(!occurs_on(&multi, day(2)));
        assert!(occurs_on(&multi, day(4)));
        assert!(occurs_on(&multi, day(5)));

        let until_midnight = event("Party", "2024-01-06T20:00", "2024-01-07T00:00");
        assert!(occurs_on(&until_midnight, day(6)));
        assert!(!occurs_on(&until_midnight, day(7)));
    }

    #[test]
    fn backwards_or_unparsable_events() {
        let backwards = event("B", "2024-01-10T10:00", "2024-01-09T10:00");
        assert!(occurs_on(&backwards, day(10)));
        assert!(!occurs_on(&backwards, day(9)));

        let broken = event("C", "someday", "2024-01-09T10:00");
        assert!(!occurs_on(&broken, day(9)));
    }
}
