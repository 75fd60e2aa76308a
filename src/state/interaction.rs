// Gesture phase of the knob, plus the pointer-button model.

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl Button {
    /// Decode a DOM `buttons` mask. Chords (several buttons held) yield `None`.
    #[must_use]
    pub fn from_buttons(mask: u16) -> Option<Self> {
        match mask {
            1 => Some(Self::Primary),
            2 => Some(Self::Secondary),
            4 => Some(Self::Middle),
            _ => None,
        }
    }
}

/// What is driving the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A button or a single finger is down; the value is floating.
    Dragging(DragSource),
    /// The text overlay is open; canvas gestures are suspended.
    Editing,
}

#[derive(Default, Debug, Clone)]
pub struct Interaction {
    pub phase: Phase,
    /// A wheel burst is waiting for its debounced commit.
    pub wheel_pending: bool,
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_editing(&self) -> bool {
        self.phase == Phase::Editing
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn dragging_with(&self, source: DragSource) -> bool {
        self.phase == Phase::Dragging(source)
    }

    pub fn begin_drag(&mut self, source: DragSource) {
        self.phase = Phase::Dragging(source);
    }

    pub fn begin_editing(&mut self) {
        self.phase = Phase::Editing;
    }

    /// Back to idle from a drag or the editor.
    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }
}
