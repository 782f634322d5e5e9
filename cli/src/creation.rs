// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Write side of the calendar: the add-event modal and its submission.

use std::{fmt, time::Duration};

use calboard_client::{CalendarEvent, ClientError, CreateEventResponse};
use chrono::{NaiveDate, NaiveTime};

use crate::notification::Notification;
use crate::service::EventService;
use crate::util::{format_form_datetime, parse_form_datetime};

pub const SUCCESS_TEXT: &str = "Event added successfully!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// The values currently held by the add-event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
}

impl EventForm {
    /// A fresh form for the given slot: one hour starting at nine.
    pub fn for_slot(date: NaiveDate) -> Self {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN);
        Self {
            title: String::new(),
            start: format_form_datetime(date, nine),
            end: format_form_datetime(date, ten),
            all_day: false,
        }
    }

    /// Fields violating the input constraints. End before start is not one of them.
    pub fn invalid_fields(&self) -> Vec<FormField> {
        let mut invalid = Vec::new();
        if self.title.is_empty() {
            invalid.push(FormField::Title);
        }
        if parse_form_datetime(&self.start).is_none() {
            invalid.push(FormField::Start);
        }
        if parse_form_datetime(&self.end).is_none() {
            invalid.push(FormField::End);
        }
        invalid
    }

    /// The payload for the event service, carrying the values exactly as typed.
    pub fn to_event(&self) -> CalendarEvent {
        CalendarEvent {
            title: self.title.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            all_day: self.all_day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Start,
    End,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Title => write!(f, "Title"),
            FormField::Start => write!(f, "Start"),
            FormField::End => write!(f, "End"),
        }
    }
}

/// Identifies one open/close cycle of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    NotOpen,
    InFlight,
    Invalid(Vec<FormField>),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotOpen => write!(f, "The event form is not open"),
            SubmitError::InFlight => write!(f, "The event is already being submitted"),
            SubmitError::Invalid(fields) => {
                let names: Vec<_> = fields.iter().map(ToString::to_string).collect();
                write!(f, "Please fill out: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// A create request ready to be sent.
#[derive(Debug, Clone)]
pub struct Submission {
    pub session: SessionId,
    pub event: CalendarEvent,
}

/// How the create request ended.
#[derive(Debug)]
pub enum Completion {
    Responded(CreateEventResponse),
    Failed(ClientError),
}

#[derive(Debug)]
pub struct Completed {
    pub session: SessionId,
    pub completion: Completion,
}

/// What the surface has to do after a submission completed.
#[derive(Debug, Default)]
pub struct Outcome {
    pub notification: Option<Notification>,

    /// Whether the event list is stale and should be fetched again.
    pub refresh: bool,
}

/// State machine of the add-event modal.
#[derive(Debug)]
pub struct CreationFlow {
    state: ModalState,
    form: EventForm,
    session: u64,
    submitting: bool,
    invalid: Vec<FormField>,
    notification_timeout: Duration,
}

impl CreationFlow {
    pub fn new(notification_timeout: Duration) -> Self {
        Self {
            state: ModalState::Closed,
            form: EventForm::default(),
            session: 0,
            submitting: false,
            invalid: Vec::new(),
            notification_timeout,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    /// Fields rejected by the last submit attempt of this session.
    pub fn invalid_fields(&self) -> &[FormField] {
        &self.invalid
    }

    /// Opens the modal for a slot. Returns `false` when it is already open.
    pub fn select_slot(&mut self, date: NaiveDate) -> bool {
        if self.is_open() {
            return false;
        }

        self.session += 1;
        self.state = ModalState::Open;
        self.form = EventForm::for_slot(date);
        self.submitting = false;
        self.invalid.clear();
        tracing::debug!(session = self.session, %date, "event form opened");
        true
    }

    /// Closes the modal without submitting.
    pub fn cancel(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }

        self.state = ModalState::Closed;
        tracing::debug!(session = self.session, "event form dismissed");
        true
    }

    /// Applies `f` to the form while the modal is open and idle.
    pub fn edit(&mut self, f: impl FnOnce(&mut EventForm)) -> bool {
        if !self.is_open() || self.submitting {
            return false;
        }

        f(&mut self.form);
        true
    }

    /// Captures the form and hands out the create request for it.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.is_open() {
            return Err(SubmitError::NotOpen);
        }
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        self.invalid = self.form.invalid_fields();
        if !self.invalid.is_empty() {
            return Err(SubmitError::Invalid(self.invalid.clone()));
        }

        self.submitting = true;
        Ok(Submission {
            session: SessionId(self.session),
            event: self.form.to_event(),
        })
    }

    /// Settles a finished create request.
    ///
    /// The modal closes whatever the outcome, as long as the request belongs
    /// to the session that is still on screen.
    pub fn complete(&mut self, done: Completed) -> Outcome {
        if done.session == SessionId(self.session) {
            self.state = ModalState::Closed;
            self.submitting = false;
        } else {
            tracing::debug!(session = ?done.session, "completion of an earlier session");
        }

        match done.completion {
            Completion::Responded(resp) if resp.success => Outcome {
                notification: Some(Notification::success(
                    SUCCESS_TEXT,
                    self.notification_timeout,
                )),
                refresh: true,
            },
            Completion::Responded(resp) => {
                tracing::warn!(extra = ?resp.extra, "event service did not accept the event");
                Outcome::default()
            }
            Completion::Failed(err) => Outcome {
                notification: Some(Notification::error(
                    err.to_string(),
                    self.notification_timeout,
                )),
                refresh: false,
            },
        }
    }
}

/// Sends the create request of a submission.
pub async fn create(service: &dyn EventService, submission: Submission) -> Completed {
    let completion = match service.create_event(&submission.event).await {
        Ok(resp) => Completion::Responded(resp),
        Err(err) => Completion::Failed(err),
    };
    Completed {
        session: submission.session,
        completion,
    }
}
