// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use calboard_client::CalendarEvent;
use chrono::{Datelike, Days, NaiveDate};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Paragraph};

use crate::accessor::EventsData;
use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{parse_event_datetime, truncate_to_width};

const WEEKS: usize = 6;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month grid of day slots with the events spanning each of them.
pub struct CalendarView;

impl CalendarView {
    pub fn new() -> Self {
        Self
    }

    fn block(&self) -> Block<'_> {
        Block::bordered().border_set(border::ROUNDED)
    }

    fn render_header(&self, store: &CalendarStore, area: Rect, buf: &mut Buffer) {
        let month = store.cursor.format("%B %Y").to_string();
        let status = match store.accessor.data() {
            EventsData::Loading => "loading…".yellow(),
            EventsData::Absent => "events unavailable".red(),
            EventsData::Loaded(_) if store.accessor.is_fetching() => "refreshing…".yellow(),
            EventsData::Loaded(events) => match events.len() {
                1 => "1 event".to_string().dark_gray(),
                n => format!("{n} events").dark_gray(),
            },
        };
        let line = Line::from(vec![month.bold(), "  ".into(), status]);
        Paragraph::new(line).centered().render(area, buf);
    }

    fn render_grid(&self, store: &CalendarStore, area: Rect, buf: &mut Buffer) {
        let [head, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        let columns = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(head);
        for (name, col) in WEEKDAYS.iter().zip(columns.iter()) {
            Paragraph::new(*name).bold().centered().render(*col, buf);
        }

        let rows = Layout::vertical([Constraint::Ratio(1, WEEKS as u32); WEEKS]).split(body);
        let mut date = grid_start(store.cursor);
        for row in rows.iter() {
            let cells = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(*row);
            for cell in cells.iter() {
                self.render_cell(store, date, *cell, buf);
                date = date.checked_add_days(Days::new(1)).unwrap_or(date);
            }
        }
    }

    fn render_cell(&self, store: &CalendarStore, date: NaiveDate, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(1) as usize;
        let mut style = Style::default();
        if date.month() != store.cursor.month() {
            style = style.dark_gray();
        }
        if date == store.today {
            style = style.blue().bold();
        }
        if date == store.cursor {
            style = style.reversed();
        }

        let mut lines = vec![Line::styled(format!("{:>2}", date.day()), style)];
        let events = store.events_on(date);
        let room = area.height.saturating_sub(1) as usize;
        for (i, event) in events.iter().enumerate() {
            if i + 1 == room && events.len() > room {
                lines.push(Line::from(format!("+{} more", events.len() - i).dark_gray()));
                break;
            }
            if i == room {
                break;
            }
            let label = event_label(event, date);
            lines.push(Line::from(truncate_to_width(&label, width).cyan()));
        }
        Paragraph::new(lines).render(area, buf);
    }
}

impl Component<CalendarStore> for CalendarView {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let block = self
            .block()
            .title(Line::from(" Calendar ".bold()).centered())
            .title_bottom(instructions().centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let [header, grid] =
            Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
        let store = store.borrow();
        self.render_header(&store, header, buf);
        self.render_grid(&store, grid, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        _store: &RefCell<CalendarStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let action = match event.code {
            KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor(-1),
            KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor(1),
            KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor(-7),
            KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor(7),
            KeyCode::PageUp => Action::MoveMonth(-1),
            KeyCode::PageDown => Action::MoveMonth(1),
            KeyCode::Char('t') => Action::GoToday,
            KeyCode::Enter | KeyCode::Char('a') => Action::SelectSlot,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Esc | KeyCode::Char('q') => return Some(Message::Exit),
            _ => return None,
        };
        dispatcher.dispatch(action);
        Some(Message::Handled)
    }
}

/// The Monday on or before the first day of the cursor's month.
fn grid_start(cursor: NaiveDate) -> NaiveDate {
    let first = cursor.with_day(1).unwrap_or(cursor);
    let offset = first.weekday().num_days_from_monday() as u64;
    first.checked_sub_days(Days::new(offset)).unwrap_or(first)
}

fn event_label(event: &CalendarEvent, date: NaiveDate) -> String {
    match parse_event_datetime(&event.start) {
        Some(start) if !event.all_day && start.date() == date => {
            format!("{} {}", start.format("%H:%M"), event.title)
        }
        _ => event.title.clone(),
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Move ".into(),
        "<←↓↑→>".blue().bold(),
        " Month ".into(),
        "<PgUp/PgDn>".blue().bold(),
        " Add ".into(),
        "<Enter>".blue().bold(),
        " Refresh ".into(),
        "<r>".blue().bold(),
        " Quit ".into(),
        "<q> ".blue().bold(),
    ])
}
