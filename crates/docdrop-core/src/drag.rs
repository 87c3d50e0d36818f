//! Drag-and-drop event classification and the "drag active" affordance.

/// The four drag events the drop target listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// `dragenter`
    Enter,
    /// `dragover`
    Over,
    /// `dragleave`
    Leave,
    /// `drop`
    Drop,
}

impl DragKind {
    /// Every kind, in listener registration order.
    pub const ALL: [Self; 4] = [Self::Enter, Self::Over, Self::Leave, Self::Drop];

    /// DOM event type name.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Enter => "dragenter",
            Self::Over => "dragover",
            Self::Leave => "dragleave",
            Self::Drop => "drop",
        }
    }

    /// Whether this event turns the affordance on (`true`) or off.
    #[must_use]
    pub const fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Over)
    }
}

/// Tracks whether the drop target shows its drag-active styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragAffordance {
    active: bool,
}

impl DragAffordance {
    /// Whether the affordance is currently shown.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.active
    }

    /// Apply a drag event. Returns `true` if the affordance changed and
    /// the styling needs updating; repeated `dragover` events are no-ops.
    pub const fn apply(&mut self, kind: DragKind) -> bool {
        let next = kind.activates();
        let changed = self.active != next;
        self.active = next;
        changed
    }
}

/// First item of a dropped file list; the rest are discarded.
///
/// The widget is single-file, like a picker without `multiple`.
pub fn first_file<T>(files: impl IntoIterator<Item = T>) -> Option<T> {
    files.into_iter().next()
}
