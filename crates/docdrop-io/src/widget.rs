//! The attached widget: DOM listeners wired to the selection state.
//!
//! [`Widget::attach`] resolves the host-page surfaces, registers the
//! picker, remove, drag-and-drop, and submit listeners, and renders
//! the initial view. Dropping the widget (or calling
//! [`Widget::destroy`]) removes every listener it registered.
//!
//! All handlers run to completion on the single browser thread. The
//! only suspension point is the image preview read, whose result is
//! applied through a [`ReadTicket`] so that a slow read can never
//! overwrite a newer selection.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use docdrop_core::{
    DragAffordance, DragKind, ReadTicket, SelectedFile, Selection, SelectionError, UiState,
    WidgetConfig,
};
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DragEvent, Event, EventTarget, File, Window};

use crate::picker;
use crate::reader::{self, ReadError};
use crate::render;
use crate::surfaces::{AttachError, Surfaces};

/// Shown when a dropped file cannot be handed to the native input.
const DROP_FAILED_NOTICE: &str =
    "The dropped file could not be attached. Please choose it with the file picker.";

/// Where a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// The user picked a file; the input already holds it.
    Picker,
    /// The user dropped a file; the input must be updated.
    Drop,
    /// The input already held a file when the widget attached
    /// (e.g. restored by back navigation).
    Restore,
}

/// A registered DOM listener, removed again on drop.
struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        event_type: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, AttachError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// State shared between the widget and its listeners.
struct Inner {
    surfaces: Surfaces,
    config: WidgetConfig,
    window: Option<Window>,
    selection: RefCell<Selection<File>>,
    drag: Cell<DragAffordance>,
    /// Set while our own synthetic `change` event is being dispatched.
    dispatching: Cell<bool>,
    /// Set once the widget is destroyed; late preview reads are dropped.
    detached: Cell<bool>,
}

/// A file selection widget attached to a host page.
pub struct Widget {
    inner: Rc<Inner>,
    listeners: Vec<Listener>,
}

impl Widget {
    /// Bind the widget to the surfaces named in `config`.
    ///
    /// If the picker input already holds a file, it becomes the initial
    /// selection; otherwise the empty view is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::Config`] for an invalid configuration,
    /// [`AttachError::MissingSurface`] if the picker input or drop
    /// target is absent (nothing is registered in that case), or
    /// [`AttachError::JsError`] if a listener cannot be added.
    pub fn attach(document: &Document, config: WidgetConfig) -> Result<Self, AttachError> {
        config.validate()?;
        let surfaces = Surfaces::resolve(document, &config.surfaces)?;

        if let Some(policy) = &config.accept {
            let accept = policy.accept_attribute();
            if !accept.is_empty() {
                surfaces.input.set_accept(&accept);
            }
        }

        let inner = Rc::new(Inner {
            selection: RefCell::new(Selection::new(config.accept.clone())),
            surfaces,
            config,
            window: web_sys::window(),
            drag: Cell::new(DragAffordance::default()),
            dispatching: Cell::new(false),
            detached: Cell::new(false),
        });

        let listeners = register(&inner)?;
        inner.sync_from_input();

        info!(
            "file selection widget attached to #{}",
            inner.config.surfaces.input
        );
        Ok(Self { inner, listeners })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> UiState {
        self.inner.selection.borrow().state()
    }

    /// Metadata of the selected file, if any.
    #[must_use]
    pub fn selected_file(&self) -> Option<SelectedFile> {
        self.inner.selection.borrow().file().cloned()
    }

    /// Remove every listener. The page keeps its current appearance.
    pub fn destroy(self) {
        drop(self);
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.inner.detached.set(true);
        self.listeners.clear();
        let surfaces = &self.inner.surfaces;
        render::set_drag_active(&surfaces.drop_target, &self.inner.config.drag_class, false);
        debug!("file selection widget detached");
    }
}

fn register(inner: &Rc<Inner>) -> Result<Vec<Listener>, AttachError> {
    let surfaces = &inner.surfaces;
    let mut listeners = Vec::new();

    listeners.push(Listener::add(&surfaces.input, "change", {
        let inner = Rc::clone(inner);
        move |_| inner.on_change()
    })?);

    if let Some(remove) = &surfaces.remove {
        listeners.push(Listener::add(remove, "click", {
            let inner = Rc::clone(inner);
            move |event| inner.on_remove(&event)
        })?);
    }

    for kind in DragKind::ALL {
        listeners.push(Listener::add(&surfaces.drop_target, kind.event_type(), {
            let inner = Rc::clone(inner);
            move |event| inner.on_drag(kind, &event)
        })?);
    }

    if let Some(submit) = &surfaces.submit {
        listeners.push(Listener::add(&submit.form, "submit", {
            let inner = Rc::clone(inner);
            move |event| inner.on_submit(&event)
        })?);
    }

    Ok(listeners)
}

impl Inner {
    fn on_change(self: &Rc<Self>) {
        if self.dispatching.get() {
            return;
        }
        match picker::first_file(self.surfaces.input.files().as_ref()) {
            Some(file) => {
                self.select(file, Origin::Picker);
            }
            // The dialog was cancelled and the browser emptied the input.
            None => self.clear(),
        }
    }

    fn on_remove(&self, event: &Event) {
        event.prevent_default();
        event.stop_propagation();
        self.clear();
    }

    fn on_drag(self: &Rc<Self>, kind: DragKind, event: &Event) {
        event.prevent_default();
        event.stop_propagation();

        let mut drag = self.drag.get();
        if drag.apply(kind) {
            render::set_drag_active(
                &self.surfaces.drop_target,
                &self.config.drag_class,
                drag.is_active(),
            );
        }
        self.drag.set(drag);

        if kind == DragKind::Drop {
            self.on_drop(event);
        }
    }

    fn on_drop(self: &Rc<Self>, event: &Event) {
        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .and_then(|transfer| transfer.files());
        let Some(file) = picker::first_file(files.as_ref()) else {
            debug!("drop carried no files; ignoring");
            return;
        };

        if self.select(file, Origin::Drop) {
            self.dispatching.set(true);
            let dispatched = picker::dispatch_change(&self.surfaces.input);
            self.dispatching.set(false);
            if let Err(e) = dispatched {
                warn!("failed to dispatch change event for dropped file: {e:?}");
            }
        }
    }

    fn on_submit(&self, event: &Event) {
        let native_files = picker::file_count(&self.surfaces.input);
        let outcome = self.selection.borrow_mut().submit(native_files);
        match outcome {
            Ok(()) => self.render(),
            Err(e) => {
                event.prevent_default();
                self.notify(&e);
            }
        }
    }

    /// Select `file` and render. Returns `true` if it was accepted.
    ///
    /// A dropped file is copied into the native input before it is
    /// committed, so the selection never shows a file the form would
    /// not send.
    fn select(self: &Rc<Self>, file: File, origin: Origin) -> bool {
        let described = picker::describe(&file);
        let checked = self.selection.borrow().check(&described);
        if let Err(e) = checked {
            self.reject(&e, origin);
            return false;
        }

        if origin == Origin::Drop
            && let Err(e) = picker::set_file(&self.surfaces.input, &file)
        {
            warn!("failed to copy dropped file into the picker: {e:?}");
            self.show_notice(DROP_FAILED_NOTICE);
            return false;
        }

        let outcome = self.selection.borrow_mut().select(described, file.clone());
        match outcome {
            Ok(ticket) => {
                self.render();
                if let Some(ticket) = ticket {
                    self.read_preview(file, ticket);
                }
                true
            }
            Err(e) => {
                self.reject(&e, origin);
                false
            }
        }
    }

    fn reject(&self, error: &SelectionError, origin: Origin) {
        if origin == Origin::Restore {
            debug!("discarding restored file: {error}");
        } else {
            self.notify(error);
        }
        self.restore_input();
    }

    fn clear(&self) {
        if self.selection.borrow_mut().clear() {
            picker::clear(&self.surfaces.input);
            self.render();
        }
    }

    /// Put the input back in step with the selection after a rejection.
    fn restore_input(&self) {
        let selection = self.selection.borrow();
        match selection.handle() {
            Some(file) => {
                if let Err(e) = picker::set_file(&self.surfaces.input, file) {
                    warn!("failed to restore the picker's file: {e:?}");
                }
            }
            None => picker::clear(&self.surfaces.input),
        }
    }

    fn sync_from_input(self: &Rc<Self>) {
        match picker::first_file(self.surfaces.input.files().as_ref()) {
            Some(file) => {
                self.select(file, Origin::Restore);
            }
            None => self.render(),
        }
    }

    fn read_preview(self: &Rc<Self>, file: File, ticket: ReadTicket) {
        let inner = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = reader::read_data_url(&file).await;
            inner.finish_read(ticket, outcome);
        });
    }

    fn finish_read(&self, ticket: ReadTicket, outcome: Result<String, ReadError>) {
        if self.detached.get() {
            return;
        }
        match outcome {
            Ok(uri) => {
                let applied = self.selection.borrow_mut().complete_read(ticket, uri);
                if applied {
                    self.render();
                }
            }
            Err(e) => {
                if self.selection.borrow().is_current(&ticket) {
                    warn!("image preview unavailable: {e}");
                }
            }
        }
    }

    fn render(&self) {
        let selection = self.selection.borrow();
        render::apply(&selection.view(), &self.surfaces);
    }

    fn notify(&self, error: &SelectionError) {
        let message = match error {
            SelectionError::NoFileSelected => self.config.empty_notice.clone(),
            SelectionError::Rejected(rejection) => rejection.to_string(),
            SelectionError::Locked => {
                debug!("ignoring interaction while submitting");
                return;
            }
        };
        self.show_notice(&message);
    }

    fn show_notice(&self, message: &str) {
        let shown = self
            .window
            .as_ref()
            .is_some_and(|window| window.alert_with_message(message).is_ok());
        if !shown {
            warn!("could not show notice: {message}");
        }
    }
}
