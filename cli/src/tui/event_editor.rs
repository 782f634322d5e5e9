// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::creation::FormField;
use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Checkbox, Form, FormItem, Input};
use crate::tui::component_page::ModalPage;
use crate::tui::dispatcher::{Action, Dispatcher};

type Store = CalendarStore;

const EDITOR_WIDTH: u16 = 56;

/// The add-event modal.
pub struct EventEditor(ModalPage<Store, EventForm>);

impl EventEditor {
    pub fn new() -> Self {
        let form = EventForm::new();
        let height = form.height() + 2; // border
        Self(ModalPage::new("Add Event", EDITOR_WIDTH, height, form))
    }
}

impl Component<Store> for EventEditor {
    fn render(&self, store: &RefCell<Store>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<Store>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<Store>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        // Only dismissal gets through while the request is in flight
        if store.borrow().flow.is_submitting() && event.code != KeyCode::Esc {
            return Some(Message::Handled);
        }
        self.0.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<Store>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<Store>) {
        self.0.deactivate(dispatcher, store);
    }
}

/// Form fields followed by a single status line.
pub struct EventForm(Form<Store, Box<dyn FormItem<Store>>>);

impl EventForm {
    pub fn new() -> Self {
        Self(Form::new(vec![
            Box::new(new_title()),
            Box::new(new_start()),
            Box::new(new_end()),
            Box::new(new_all_day()),
        ]))
    }

    pub fn height(&self) -> u16 {
        self.0.height() + 1
    }

    fn split(area: Rect) -> (Rect, Rect) {
        let [form, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        (form, status)
    }
}

impl Component<Store> for EventForm {
    fn render(&self, store: &RefCell<Store>, area: Rect, buf: &mut Buffer) {
        let (form, status) = Self::split(area);
        self.0.render(store, form, buf);

        let store = store.borrow();
        let invalid = store.flow.invalid_fields();
        let line = if store.flow.is_submitting() {
            Line::from("Submitting…".yellow())
        } else if !invalid.is_empty() {
            let names: Vec<_> = invalid.iter().map(ToString::to_string).collect();
            Line::from(format!("Please fill out: {}", names.join(", ")).red())
        } else {
            Line::default()
        };
        Paragraph::new(line).centered().render(status, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<Store>, area: Rect) -> Option<(u16, u16)> {
        let (form, _) = Self::split(area);
        self.0.get_cursor_position(store, form)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<Store>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let (form, _) = Self::split(area);
        self.0.on_key(dispatcher, store, form, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<Store>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<Store>) {
        self.0.deactivate(dispatcher, store);
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $form_field: ident, $action: ident) => {
        fn $fn() -> Input<Store, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<Store, String> for $acc {
            fn get(store: &RefCell<Store>) -> String {
                store.borrow().flow.form().$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }

            fn is_invalid(store: &RefCell<Store>) -> bool {
                store
                    .borrow()
                    .flow
                    .invalid_fields()
                    .contains(&FormField::$form_field)
            }
        }
    };
}

new_input!(new_title, "Title", TitleAccess, title, Title, UpdateEventTitle);
new_input!(
    new_start,
    "Start (YYYY-MM-DDTHH:MM)",
    StartAccess,
    start,
    Start,
    UpdateEventStart
);
new_input!(
    new_end,
    "End (YYYY-MM-DDTHH:MM)",
    EndAccess,
    end,
    End,
    UpdateEventEnd
);

fn new_all_day() -> Checkbox<Store, AllDayAccess> {
    Checkbox::new("All day", "All day event")
}

struct AllDayAccess;

impl Access<Store, bool> for AllDayAccess {
    fn get(store: &RefCell<Store>) -> bool {
        store.borrow().flow.form().all_day
    }

    fn set(dispatcher: &mut Dispatcher, value: bool) -> bool {
        dispatcher.dispatch(Action::UpdateEventAllDay(value));
        true
    }
}
