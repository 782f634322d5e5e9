// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the calendar view draws on the alternate screen.
static TERMINAL_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Keeps log output off stderr until dropped.
#[derive(Debug)]
pub struct TerminalClaim(());

impl TerminalClaim {
    pub fn acquire() -> Self {
        TERMINAL_CLAIMED.store(true, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for TerminalClaim {
    fn drop(&mut self) {
        TERMINAL_CLAIMED.store(false, Ordering::SeqCst);
    }
}

/// Destination of a single log record.
#[derive(Debug)]
pub enum LogWriter {
    Stderr(io::Stderr),
    Sink(io::Sink),
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::Stderr(w) => w.write(buf),
            LogWriter::Sink(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::Stderr(w) => w.flush(),
            LogWriter::Sink(w) => w.flush(),
        }
    }
}

/// Writer factory for the fmt subscriber; records are dropped while a
/// [`TerminalClaim`] is held.
pub fn make_writer() -> LogWriter {
    if TERMINAL_CLAIMED.load(Ordering::SeqCst) {
        LogWriter::Sink(io::sink())
    } else {
        LogWriter::Stderr(io::stderr())
    }
}
