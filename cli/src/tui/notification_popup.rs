// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::notification::NotificationKind;
use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::Component;

const POPUP_WIDTH: u16 = 40;
const POPUP_HEIGHT: u16 = 4;

/// Toast in the top-right corner showing the current notification, if any.
pub struct NotificationPopup;

impl NotificationPopup {
    pub fn new() -> Self {
        Self
    }

    fn popup_area(area: Rect) -> Rect {
        let width = POPUP_WIDTH.min(area.width);
        let height = POPUP_HEIGHT.min(area.height);
        Rect::new(area.right().saturating_sub(width + 1), area.y + 1, width, height)
            .intersection(area)
    }
}

impl Component<CalendarStore> for NotificationPopup {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let Some(notification) = &store.notification else {
            return;
        };

        let color = match notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let area = Self::popup_area(area);
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title(Line::from(format!(" {} ", notification.title).bold()))
            .fg(color);

        Clear.render(area, buf);
        Paragraph::new(notification.text.as_str())
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;

    use super::*;
    use crate::notification::Notification;

    const AREA: Rect = Rect::new(0, 0, 80, 20);

    fn store() -> RefCell<CalendarStore> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        RefCell::new(CalendarStore::new(today, Duration::from_secs(1)))
    }

    fn rendered(store: &RefCell<CalendarStore>) -> String {
        let mut buf = Buffer::empty(AREA);
        NotificationPopup::new().render(store, AREA, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_nothing_without_notification() {
        assert!(rendered(&store()).trim().is_empty());
    }

    #[test]
    fn renders_title_and_text() {
        let store = store();
        store.borrow_mut().notification = Some(Notification::error(
            "Network Error: connection refused",
            Duration::from_secs(1),
        ));
        let screen = rendered(&store);
        assert!(screen.contains("Error"));
        assert!(screen.contains("Network Error: connection"));
    }
}
