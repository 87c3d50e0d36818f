//! The selection state machine.
//!
//! [`Selection`] owns "which file is selected, if any" together with
//! its [`Preview`], and derives a [`View`] describing which host-page
//! surfaces are visible. The browser layer renders the view; it never
//! decides visibility on its own.
//!
//! # Stale image reads
//!
//! Image previews are read asynchronously. [`Selection::select`] hands
//! out a [`ReadTicket`] stamped with the selection generation, and
//! every `select` or `clear` advances the generation. A completed read
//! is applied through [`Selection::complete_read`], which drops it
//! unless the ticket is still current, so a slow read for an earlier
//! file can never overwrite the preview of a newer one.

use log::debug;

use crate::accept::{AcceptPolicy, Rejection};
use crate::preview::{Preview, VisibleSurface};
use crate::types::{SelectedFile, UiState};

/// Errors returned by selection and submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Submission was attempted without a file.
    #[error("no file selected")]
    NoFileSelected,

    /// The file failed the configured [`AcceptPolicy`].
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The form is already submitting; the selection is frozen.
    #[error("the form is already being submitted")]
    Locked,
}

/// Proof that an image read was issued for a particular selection.
///
/// Not `Clone`: each ticket completes at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an image read must be started for this ticket"]
pub struct ReadTicket {
    generation: u64,
}

/// The selected file as shown in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    /// File name.
    pub name: &'a str,
    /// Formatted size, e.g. `"2 MB"`.
    pub size: String,
}

/// Everything the renderer needs to draw the widget.
///
/// The picker prompt and the summary are mutually exclusive by
/// construction: the prompt is visible exactly when there is no summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    /// Current state.
    pub state: UiState,
    /// Summary of the selected file; `None` when empty.
    pub summary: Option<Summary<'a>>,
    /// The one visible preview surface, if any.
    pub preview: Option<VisibleSurface<'a>>,
}

impl View<'_> {
    /// Whether the picker prompt (drop target) is shown.
    #[must_use]
    pub const fn prompt_visible(&self) -> bool {
        self.summary.is_none()
    }

    /// Whether the preview container is shown.
    #[must_use]
    pub const fn preview_container_visible(&self) -> bool {
        self.summary.is_some()
    }

    /// Whether the submit control shows its busy indicator and is disabled.
    #[must_use]
    pub const fn busy(&self) -> bool {
        matches!(self.state, UiState::Submitting)
    }
}

/// Preview of an empty selection.
static NO_PREVIEW: Preview = Preview::None;

struct Current<H> {
    file: SelectedFile,
    handle: H,
    preview: Preview,
}

enum Phase<H> {
    Empty,
    Selected(Current<H>),
    Submitting(Current<H>),
}

/// Single-file selection state.
///
/// `H` is whatever the host uses to refer to the file's bytes (a
/// browser `File` in `docdrop-io`, `()` in tests). It is stored
/// alongside the metadata and handed back through [`Selection::handle`].
pub struct Selection<H = ()> {
    phase: Phase<H>,
    generation: u64,
    accept: Option<AcceptPolicy>,
}

impl<H> Default for Selection<H> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<H> Selection<H> {
    /// An empty selection with an optional acceptance policy.
    #[must_use]
    pub const fn new(accept: Option<AcceptPolicy>) -> Self {
        Self {
            phase: Phase::Empty,
            generation: 0,
            accept,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> UiState {
        match self.phase {
            Phase::Empty => UiState::Empty,
            Phase::Selected(_) => UiState::Selected,
            Phase::Submitting(_) => UiState::Submitting,
        }
    }

    const fn current(&self) -> Option<&Current<H>> {
        match &self.phase {
            Phase::Empty => None,
            Phase::Selected(current) | Phase::Submitting(current) => Some(current),
        }
    }

    const fn current_mut(&mut self) -> Option<&mut Current<H>> {
        match &mut self.phase {
            Phase::Empty => None,
            Phase::Selected(current) | Phase::Submitting(current) => Some(current),
        }
    }

    /// Metadata of the selected file.
    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        self.current().map(|c| &c.file)
    }

    /// Host handle of the selected file.
    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        self.current().map(|c| &c.handle)
    }

    /// Current preview; [`Preview::None`] when empty.
    #[must_use]
    pub fn preview(&self) -> &Preview {
        self.current().map_or(&NO_PREVIEW, |c| &c.preview)
    }

    /// Whether [`select`](Self::select) would accept `file`, without
    /// changing anything.
    ///
    /// Lets the caller finish side effects that can fail (such as
    /// copying a dropped file into the native input) before committing.
    ///
    /// # Errors
    ///
    /// The same errors `select` would return.
    pub fn check(&self, file: &SelectedFile) -> Result<(), SelectionError> {
        if matches!(self.phase, Phase::Submitting(_)) {
            return Err(SelectionError::Locked);
        }
        if let Some(policy) = &self.accept {
            policy.check(file)?;
        }
        Ok(())
    }

    /// Select `file`, replacing any previous selection wholesale.
    ///
    /// Returns a [`ReadTicket`] when the file is an image: the caller
    /// must read it as a data URI and report back through
    /// [`complete_read`](Self::complete_read). Icons need no ticket.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Locked`] while submitting, or
    /// [`SelectionError::Rejected`] if the acceptance policy turns the
    /// file away. The previous selection is kept in both cases.
    pub fn select(
        &mut self,
        file: SelectedFile,
        handle: H,
    ) -> Result<Option<ReadTicket>, SelectionError> {
        self.check(&file)?;

        self.generation += 1;
        let kind = file.kind();
        let preview = Preview::for_kind(kind);
        let ticket = preview.is_loading().then_some(ReadTicket {
            generation: self.generation,
        });

        debug!(
            "selected {:?} ({} bytes, {kind:?}), generation {}",
            file.name, file.size_bytes, self.generation
        );
        self.phase = Phase::Selected(Current {
            file,
            handle,
            preview,
        });
        Ok(ticket)
    }

    /// Drop the selection.
    ///
    /// Returns `true` if something changed. Clearing an empty selection
    /// is a no-op, and a submitting selection cannot be cleared.
    pub fn clear(&mut self) -> bool {
        match self.phase {
            Phase::Selected(_) => {
                self.generation += 1;
                self.phase = Phase::Empty;
                debug!("selection cleared, generation {}", self.generation);
                true
            }
            Phase::Empty | Phase::Submitting(_) => false,
        }
    }

    /// Whether `ticket` still belongs to the current selection.
    #[must_use]
    pub const fn is_current(&self, ticket: &ReadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished image read.
    ///
    /// Returns `true` if the preview changed. A stale ticket (the file
    /// was removed or replaced since the read started) is discarded.
    pub fn complete_read(&mut self, ticket: ReadTicket, data_uri: String) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                "discarding stale preview read (generation {}, current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        self.current_mut()
            .is_some_and(|current| current.preview.resolve(data_uri))
    }

    /// Guard a form submission.
    ///
    /// `native_files` is the number of files in the native picker, the
    /// control actually transmitted with the form. On success the state
    /// becomes [`UiState::Submitting`] and stays there.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoFileSelected`] if nothing is selected
    /// or the native picker is empty, and [`SelectionError::Locked`] if
    /// the form is already submitting. The state is unchanged on error.
    pub fn submit(&mut self, native_files: usize) -> Result<(), SelectionError> {
        match std::mem::replace(&mut self.phase, Phase::Empty) {
            Phase::Selected(current) if native_files > 0 => {
                debug!("submitting {:?}", current.file.name);
                self.phase = Phase::Submitting(current);
                Ok(())
            }
            Phase::Submitting(current) => {
                self.phase = Phase::Submitting(current);
                Err(SelectionError::Locked)
            }
            other => {
                self.phase = other;
                Err(SelectionError::NoFileSelected)
            }
        }
    }

    /// Describe the visible surfaces for the current state.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        let current = self.current();
        View {
            state: self.state(),
            summary: current.map(|c| Summary {
                name: &c.file.name,
                size: c.file.formatted_size(),
            }),
            preview: current.and_then(|c| c.preview.visible_surface()),
        }
    }
}
