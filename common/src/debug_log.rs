//! On-screen log buffer.
//!
//! Keeps the last few log records so a host can draw them next to the signs.
//! Lines are truncated to fit a fixed width and the oldest line is dropped
//! when the buffer is full.

use core::fmt::{self, Write};

use heapless::{Deque, String};
use log::Level;

// =============================================================================
// Configuration
// =============================================================================

/// Maximum number of lines kept.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per line.
pub const LOG_LINE_LENGTH: usize = 48;

// =============================================================================
// Log Lines
// =============================================================================

/// One buffered record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub text: String<LOG_LINE_LENGTH>,
}

impl LogLine {
    /// Single-letter level tag shown in front of the text.
    pub const fn tag(&self) -> char {
        match self.level {
            Level::Error => 'E',
            Level::Warn => 'W',
            Level::Info => 'I',
            Level::Debug => 'D',
            Level::Trace => 'T',
        }
    }
}

/// Writer that silently drops everything past the line capacity.
struct Truncating<'a>(&'a mut String<LOG_LINE_LENGTH>);

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Ring Buffer
// =============================================================================

/// Ring buffer of the last [`LOG_BUFFER_SIZE`] log lines.
pub struct DebugLog {
    buffer: Deque<LogLine, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Append a message, truncated to [`LOG_LINE_LENGTH`].
    pub fn push(
        &mut self,
        level: Level,
        msg: &str,
    ) {
        self.push_fmt(level, format_args!("{msg}"));
    }

    /// Append formatted arguments, truncated to [`LOG_LINE_LENGTH`].
    pub fn push_fmt(
        &mut self,
        level: Level,
        args: fmt::Arguments<'_>,
    ) {
        let mut text = String::new();
        let _ = Truncating(&mut text).write_fmt(args);

        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(LogLine { level, text }).ok();
    }

    /// Lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogLine> { self.buffer.iter() }

    #[inline]
    pub const fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}
