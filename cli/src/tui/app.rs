// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc, sync::Arc, time::Duration, time::Instant};

use chrono::Local;
use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::{DefaultTerminal, Frame};
use tokio::task::JoinSet;

use crate::accessor::{Fetched, fetch};
use crate::config::UiConfig;
use crate::creation::{Completed, ModalState, create};
use crate::logging::TerminalClaim;
use crate::service::EventService;
use crate::tui::calendar_store::{CalendarStore, Request};
use crate::tui::calendar_view::CalendarView;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_editor::EventEditor;
use crate::tui::notification_popup::NotificationPopup;

const TICK: Duration = Duration::from_millis(50);

/// Runs the calendar view until the user quits.
pub async fn run_calendar(
    service: Arc<dyn EventService>,
    ui: &UiConfig,
) -> Result<(), Box<dyn Error>> {
    let today = Local::now().date_naive();
    let store = Rc::new(RefCell::new(CalendarStore::new(
        today,
        ui.notification_timeout(),
    )));

    let claim = TerminalClaim::acquire();
    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);
        let mut app = App::new(service, dispatcher);
        app.run(&store, &mut terminal).await
    }; // requests still in flight are aborted with the app
    ratatui::restore();
    drop(claim);
    result
}

/// A finished network request.
enum Done {
    Fetched(Fetched),
    Created(Completed),
}

struct App {
    service: Arc<dyn EventService>,
    dispatcher: Dispatcher,
    view: CalendarView,
    editor: EventEditor,
    popup: NotificationPopup,
    editor_open: bool,
    area: Rect,
    tasks: JoinSet<Done>,
}

impl App {
    fn new(service: Arc<dyn EventService>, dispatcher: Dispatcher) -> Self {
        Self {
            service,
            dispatcher,
            view: CalendarView::new(),
            editor: EventEditor::new(),
            popup: NotificationPopup::new(),
            editor_open: false,
            area: Rect::default(),
            tasks: JoinSet::new(),
        }
    }

    async fn run(
        &mut self,
        store: &RefCell<CalendarStore>,
        terminal: &mut DefaultTerminal,
    ) -> Result<(), Box<dyn Error>> {
        store.borrow_mut().mount();
        loop {
            self.drain_tasks(store);
            self.spawn_requests(store);
            store.borrow_mut().expire_notification(Instant::now());
            self.sync_editor(store);

            terminal.draw(|frame| self.draw(store, frame))?;

            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(Message::Exit) = self.on_key(store, key)
            {
                break;
            }

            // Let request tasks make progress between frames
            tokio::task::yield_now().await;
        }

        if !self.tasks.is_empty() {
            tracing::debug!(count = self.tasks.len(), "dropping requests in flight");
        }
        Ok(())
    }

    fn draw(&mut self, store: &RefCell<CalendarStore>, frame: &mut Frame) {
        let area = frame.area();
        self.area = area;

        self.view.render(store, area, frame.buffer_mut());
        if self.editor_open {
            self.editor.render(store, area, frame.buffer_mut());
            if let Some(pos) = self.editor.get_cursor_position(store, area) {
                frame.set_cursor_position(pos);
            }
        }
        self.popup.render(store, area, frame.buffer_mut());
    }

    fn on_key(&mut self, store: &RefCell<CalendarStore>, key: KeyEvent) -> Option<Message> {
        let msg = match self.editor_open {
            true => self
                .editor
                .on_key(&mut self.dispatcher, store, self.area, key),
            false => self.view.on_key(&mut self.dispatcher, store, self.area, key),
        };
        self.sync_editor(store);
        msg
    }

    /// Activates or deactivates the editor to follow the modal state.
    fn sync_editor(&mut self, store: &RefCell<CalendarStore>) {
        let open = store.borrow().flow.state() == ModalState::Open;
        if open == self.editor_open {
            return;
        }

        self.editor_open = open;
        match open {
            true => self.editor.activate(&mut self.dispatcher, store),
            false => self.editor.deactivate(&mut self.dispatcher, store),
        }
    }

    fn spawn_requests(&mut self, store: &RefCell<CalendarStore>) {
        let requests = store.borrow_mut().take_requests();
        for request in requests {
            let service = self.service.clone();
            match request {
                Request::Fetch(ticket) => {
                    tracing::debug!(?ticket, "fetching events");
                    self.tasks.spawn(async move {
                        Done::Fetched(fetch(service.as_ref(), ticket).await)
                    });
                }
                Request::Create(submission) => {
                    tracing::debug!(title = %submission.event.title, "creating event");
                    self.tasks.spawn(async move {
                        Done::Created(create(service.as_ref(), submission).await)
                    });
                }
            }
        }
    }

    fn drain_tasks(&mut self, store: &RefCell<CalendarStore>) {
        while let Some(joined) = self.tasks.try_join_next() {
            match joined {
                Ok(Done::Fetched(fetched)) => store.borrow_mut().on_fetched(fetched),
                Ok(Done::Created(done)) => store.borrow_mut().on_completed(done),
                Err(err) => tracing::warn!(%err, "request task did not finish"),
            }
        }
    }
}
