//! View state shared by both pages: modals, buttons with timed reverts, and
//! text previews.

pub mod render;

use std::time::Duration;

use tokio::time::Instant;

/// How long a transient button state (copy success, maintenance error) stays
/// visible before reverting.
pub const TRANSIENT_STATE: Duration = Duration::from_millis(2000);

pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Collection,
    SystemPrompt,
    Conversation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState<T> {
    Hidden,
    Shown(T),
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self::Hidden
    }
}

impl<T> ModalState<T> {
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown(_))
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            Self::Shown(content) => Some(content),
            Self::Hidden => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Shown(content) => Some(content),
            Self::Hidden => None,
        }
    }

    pub fn show(&mut self, content: T) {
        *self = Self::Shown(content);
    }

    /// Hides the modal and hands back what it was showing.
    pub fn close(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Self::Shown(content) => Some(content),
            Self::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    Primary,
    Danger,
    Success,
}

impl ButtonTone {
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-blue-500 hover:bg-blue-700",
            Self::Danger => "bg-red-500 hover:bg-red-700",
            Self::Success => "bg-green-500 hover:bg-green-700",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Revert {
    at: Instant,
    label: String,
    tone: ButtonTone,
}

/// A button whose label and tone may temporarily change and snap back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientButton {
    label: String,
    tone: ButtonTone,
    revert: Option<Revert>,
}

impl TransientButton {
    pub fn new(label: impl Into<String>, tone: ButtonTone) -> Self {
        Self {
            label: label.into(),
            tone,
            revert: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tone(&self) -> ButtonTone {
        self.tone
    }

    /// Sets a state that stays until replaced. Cancels any pending revert.
    pub fn set(&mut self, label: impl Into<String>, tone: ButtonTone) {
        self.label = label.into();
        self.tone = tone;
        self.revert = None;
    }

    /// Shows `label`/`tone` now and switches to `then_label`/`then_tone` once
    /// [`TRANSIENT_STATE`] has elapsed from `now`.
    pub fn flash(
        &mut self,
        label: impl Into<String>,
        tone: ButtonTone,
        then_label: impl Into<String>,
        then_tone: ButtonTone,
        now: Instant,
    ) {
        self.label = label.into();
        self.tone = tone;
        self.revert = Some(Revert {
            at: now + TRANSIENT_STATE,
            label: then_label.into(),
            tone: then_tone,
        });
    }

    pub fn revert_deadline(&self) -> Option<Instant> {
        self.revert.as_ref().map(|revert| revert.at)
    }

    /// Applies a due revert. Returns whether the button changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.revert.take() {
            Some(revert) if revert.at <= now => {
                self.label = revert.label;
                self.tone = revert.tone;
                true
            }
            pending => {
                self.revert = pending;
                false
            }
        }
    }
}

/// The first [`PREVIEW_CHARS`] characters followed by an ellipsis, which is
/// appended even when nothing was cut.
pub fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
