// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// Plain text table, one row per record with a bold header line.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'static str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<_> = self.columns.iter().map(|c| c.name().width()).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|data| self.columns.iter().map(|col| col.format(data)).collect())
            .collect();
        let widths = self.widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        for (i, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
            let cell = pad(&col.name(), *width, col.padding_direction(), i == last);
            write!(f, "{}", cell.bold())?;
            write_end(f, i == last, self.separator)?;
        }

        for (data, cells) in self.data.iter().zip(rows) {
            for (i, ((col, cell), width)) in self.columns.iter().zip(cells).zip(&widths).enumerate()
            {
                let cell = pad(&cell, *width, col.padding_direction(), i == last);
                match col.get_color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                write_end(f, i == last, self.separator)?;
            }
        }
        Ok(())
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // Last column does not need padding if it's left-aligned
        PaddingDirection::Left if is_last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}

fn write_end(f: &mut fmt::Formatter<'_>, is_last: bool, separator: &str) -> fmt::Result {
    match is_last {
        true => writeln!(f),
        false => write!(f, "{separator}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name;

    impl TableColumn<(&'static str, u32)> for Name {
        fn name(&self) -> Cow<'_, str> {
            "Name".into()
        }

        fn format<'a>(&self, data: &'a (&'static str, u32)) -> Cow<'a, str> {
            data.0.into()
        }
    }

    struct Count;

    impl TableColumn<(&'static str, u32)> for Count {
        fn name(&self) -> Cow<'_, str> {
            "N".into()
        }

        fn format<'a>(&self, data: &'a (&'static str, u32)) -> Cow<'a, str> {
            data.1.to_string().into()
        }

        fn padding_direction(&self) -> PaddingDirection {
            PaddingDirection::Right
        }
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad("日本", 6, PaddingDirection::Left, false), "日本  ");
        assert_eq!(pad("7", 3, PaddingDirection::Right, true), "  7");
        assert_eq!(pad("abc", 6, PaddingDirection::Left, true), "abc");
    }

    #[test]
    fn renders_header_and_rows() {
        colored::control::set_override(false);
        let data = vec![("alpha", 1), ("b", 20)];

        let names = [Name];
        let out = Table::new(&names, &data).to_string();
        assert_eq!(out, "Name\nalpha\nb\n");
    }

    #[test]
    fn right_aligned_last_column_is_padded() {
        colored::control::set_override(false);
        let data = vec![("x", 1), ("y", 300)];
        let counts = [Count];
        let out = Table::new(&counts, &data).to_string();
        assert_eq!(out, "  N\n  1\n300\n");
    }
}
