//! Clipboard sinks: the system clipboard, and an OSC 52 terminal escape used
//! when no system clipboard can be reached.

use std::io::{self, Write};

use arboard::Clipboard;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Backend(String),
    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),
}

pub trait ClipboardSink {
    fn is_available(&self) -> bool {
        true
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::debug!("system clipboard unavailable: {err}");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("no system clipboard".into()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Backend(err.to_string()))
    }
}

/// Writes the OSC 52 "set clipboard" sequence, which most terminal emulators
/// forward to the desktop clipboard.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Uses `primary` when it reports itself available and `fallback` otherwise.
/// A failing primary write is reported as is; it does not fall through.
pub struct FallbackClipboard<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ClipboardSink, F: ClipboardSink> FallbackClipboard<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ClipboardSink, F: ClipboardSink> ClipboardSink for FallbackClipboard<P, F> {
    fn is_available(&self) -> bool {
        self.primary.is_available() || self.fallback.is_available()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.primary.is_available() {
            self.primary.set_text(text)
        } else {
            tracing::debug!("falling back to secondary clipboard sink");
            self.fallback.set_text(text)
        }
    }
}

/// The clipboard the console binary uses.
pub fn terminal_clipboard() -> FallbackClipboard<SystemClipboard, Osc52Clipboard<io::Stderr>> {
    FallbackClipboard::new(SystemClipboard::new(), Osc52Clipboard::new(io::stderr()))
}
