// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Moves the slot cursor by a number of days.
    MoveCursor(i64),
    /// Moves the slot cursor by a number of months.
    MoveMonth(i32),
    GoToday,
    SelectSlot,
    Refresh,
    CancelEvent,
    UpdateEventTitle(String),
    UpdateEventStart(String),
    UpdateEventEnd(String),
    UpdateEventAllDay(bool),
    SubmitEvent,
}
