use tracing::debug;

use super::file::SelectedFile;
use super::notify::Notification;
use super::preview;
use super::slots::Slot;

/// The element mutations a dropzone needs from its host.
///
/// Implemented over the DOM in [`super::dom::DomSurface`]; anything that can
/// show, hide and label six slots works.
pub trait Surface {
    fn set_visible(&self, slot: Slot, visible: bool);

    fn set_filename(&self, text: &str);

    /// `None` clears the thumbnail.
    fn set_background_image(&self, uri: Option<&str>);

    /// Drop the input's value so the platform reports "no file selected".
    fn reset_input(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Empty,
    Selected(SelectedFile),
}

/// Ticket for an asynchronous thumbnail load.
///
/// Only the ticket of the most recent transition is honoured; completions
/// carrying an older generation are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    generation: u64,
    mime_type: String,
}

impl ImageRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Selection state machine over a [`Surface`].
///
/// Notifications are queued rather than delivered, so the owner can publish
/// them with no borrow of the widget outstanding; see
/// [`Dropzone::take_notifications`].
pub struct Dropzone<S> {
    surface: S,
    state: State,
    generation: u64,
    outbox: Vec<Notification>,
}

impl<S: Surface> Dropzone<S> {
    /// Wraps a surface without touching it; call [`Dropzone::connect`] to
    /// bring it into the initial state.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: State::Empty,
            generation: 0,
            outbox: Vec::new(),
        }
    }

    /// Forces the empty state and announces the widget.
    pub fn connect(&mut self) {
        self.clear();
        debug!("dropzone connected");
        self.outbox.push(Notification::Connect);
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = State::Empty;

        self.surface.reset_input();
        self.surface.set_visible(Slot::Input, true);
        self.surface.set_visible(Slot::Placeholder, true);
        self.surface.set_visible(Slot::Preview, false);
        self.surface.set_visible(Slot::PreviewImage, false);
        self.surface.set_background_image(None);
        self.surface.set_filename("");

        debug!(generation = self.generation, "dropzone cleared");
        self.outbox.push(Notification::Clear);
    }

    /// Applies a selection change.
    ///
    /// `None` (e.g. a cancelled file chooser) leaves everything as it was.
    /// For image files the returned request must be fulfilled with
    /// [`Dropzone::image_loaded`] once the bytes are available.
    pub fn select(&mut self, file: Option<SelectedFile>) -> Option<ImageRequest> {
        let file = match file {
            Some(file) => file,
            None => {
                debug!("empty selection ignored");
                return None;
            }
        };

        self.generation += 1;

        self.surface.set_visible(Slot::Input, false);
        self.surface.set_visible(Slot::Placeholder, false);
        self.surface.set_filename(&file.name);
        self.surface.set_visible(Slot::Preview, true);
        self.surface.set_visible(Slot::PreviewImage, false);
        self.surface.set_background_image(None);

        let request = file.is_image().then(|| ImageRequest {
            generation: self.generation,
            mime_type: file.mime_type.clone(),
        });

        debug!(
            name = %file.name,
            mime_type = %file.mime_type,
            generation = self.generation,
            "dropzone file selected"
        );
        self.state = State::Selected(file.clone());
        self.outbox.push(Notification::Change(file));

        request
    }

    /// Shows the thumbnail for `request`. Returns `false` when the request
    /// was superseded and nothing changed.
    pub fn image_loaded(&mut self, request: &ImageRequest, bytes: &[u8]) -> bool {
        if !self.is_current(request) {
            debug!(
                stale = request.generation,
                current = self.generation,
                "discarding superseded image load"
            );
            return false;
        }

        let uri = preview::data_uri(&request.mime_type, bytes);
        self.surface.set_visible(Slot::PreviewImage, true);
        self.surface.set_background_image(Some(&uri));
        true
    }

    /// A failed load leaves the thumbnail hidden and without a source.
    pub fn image_failed(&mut self, request: &ImageRequest) {
        if self.is_current(request) {
            self.surface.set_visible(Slot::PreviewImage, false);
            self.surface.set_background_image(None);
        }
    }

    /// Invalidates any load still in flight. Called when the widget's
    /// subtree goes away.
    pub fn detach(&mut self) {
        self.generation += 1;
        debug!("dropzone detached");
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        match &self.state {
            State::Selected(file) => Some(file),
            State::Empty => None,
        }
    }

    /// Notifications emitted since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn is_current(&self, request: &ImageRequest) -> bool {
        request.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Visible(Slot, bool),
        Filename(String),
        Background(Option<String>),
        ResetInput,
        Notified(Notification),
    }

    /// Records every mutation and notification in one shared journal.
    #[derive(Clone, Default)]
    struct Recorder {
        journal: Rc<RefCell<Vec<Op>>>,
        visible: Rc<RefCell<HashMap<Slot, bool>>>,
        filename: Rc<RefCell<String>>,
        background: Rc<RefCell<Option<String>>>,
        input_value: Rc<RefCell<Option<String>>>,
    }

    impl Recorder {
        fn is_visible(&self, slot: Slot) -> bool {
            self.visible.borrow().get(&slot).copied().unwrap_or(true)
        }

        fn snapshot(&self) -> (Vec<(Slot, bool)>, String, Option<String>) {
            let visible = Slot::ALL.iter().map(|s| (*s, self.is_visible(*s))).collect();
            (visible, self.filename.borrow().clone(), self.background.borrow().clone())
        }

        fn notifications(&self) -> Vec<Notification> {
            self.journal
                .borrow()
                .iter()
                .filter_map(|op| match op {
                    Op::Notified(n) => Some(n.clone()),
                    _ => None,
                })
                .collect()
        }

        fn forget(&self) {
            self.journal.borrow_mut().clear();
        }
    }

    impl Surface for Recorder {
        fn set_visible(&self, slot: Slot, visible: bool) {
            self.visible.borrow_mut().insert(slot, visible);
            self.journal.borrow_mut().push(Op::Visible(slot, visible));
        }

        fn set_filename(&self, text: &str) {
            *self.filename.borrow_mut() = text.to_string();
            self.journal.borrow_mut().push(Op::Filename(text.to_string()));
        }

        fn set_background_image(&self, uri: Option<&str>) {
            *self.background.borrow_mut() = uri.map(str::to_string);
            self.journal.borrow_mut().push(Op::Background(uri.map(str::to_string)));
        }

        fn reset_input(&self) {
            *self.input_value.borrow_mut() = None;
            self.journal.borrow_mut().push(Op::ResetInput);
        }
    }

    /// Drives a dropzone and publishes its notifications into the recorder's
    /// journal after every call, the way the DOM controller does.
    struct Harness {
        dropzone: Dropzone<Recorder>,
        recorder: Recorder,
    }

    impl Harness {
        fn bound() -> Self {
            let recorder = Recorder::default();
            let mut harness = Self {
                dropzone: Dropzone::new(recorder.clone()),
                recorder,
            };
            harness.dropzone.connect();
            harness.flush();
            harness
        }

        fn flush(&mut self) {
            for notification in self.dropzone.take_notifications() {
                self.recorder.journal.borrow_mut().push(Op::Notified(notification));
            }
        }

        fn clear(&mut self) {
            self.dropzone.clear();
            self.flush();
        }

        fn select(&mut self, file: Option<SelectedFile>) -> Option<ImageRequest> {
            let request = self.dropzone.select(file);
            self.flush();
            request
        }

        fn image_loaded(&mut self, request: &ImageRequest, bytes: &[u8]) -> bool {
            let applied = self.dropzone.image_loaded(request, bytes);
            self.flush();
            applied
        }
    }

    fn pdf() -> SelectedFile {
        SelectedFile::new("doc.pdf", "application/pdf")
    }

    fn cat() -> SelectedFile {
        SelectedFile::new("cat.png", "image/png")
    }

    fn assert_complementary(recorder: &Recorder) {
        let empty_group = recorder.is_visible(Slot::Input) && recorder.is_visible(Slot::Placeholder);
        let hidden_group = !recorder.is_visible(Slot::Input) && !recorder.is_visible(Slot::Placeholder);
        let preview = recorder.is_visible(Slot::Preview);

        assert!(empty_group || hidden_group, "input and placeholder must move together");
        assert_ne!(empty_group, preview, "exactly one group must be visible");
    }

    #[test]
    fn bind_starts_empty_and_connects_once() {
        let h = Harness::bound();

        assert_eq!(h.dropzone.state(), &State::Empty);
        assert!(h.recorder.is_visible(Slot::Input));
        assert!(h.recorder.is_visible(Slot::Placeholder));
        assert!(!h.recorder.is_visible(Slot::Preview));
        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(
            h.recorder.notifications(),
            vec![Notification::Clear, Notification::Connect]
        );
    }

    #[test]
    fn notifications_are_drained_once() {
        let mut dropzone = Dropzone::new(Recorder::default());
        dropzone.connect();

        assert_eq!(dropzone.take_notifications().len(), 2);
        assert!(dropzone.take_notifications().is_empty());
    }

    #[test]
    fn selecting_a_document_shows_preview_without_image() {
        let mut h = Harness::bound();
        h.recorder.forget();

        let request = h.select(Some(pdf()));

        assert!(request.is_none());
        assert_eq!(h.dropzone.selected(), Some(&pdf()));
        assert!(h.recorder.is_visible(Slot::Preview));
        assert!(!h.recorder.is_visible(Slot::Input));
        assert!(!h.recorder.is_visible(Slot::Placeholder));
        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(*h.recorder.filename.borrow(), "doc.pdf");
        assert_eq!(h.recorder.notifications(), vec![Notification::Change(pdf())]);
    }

    #[test]
    fn selecting_an_image_notifies_before_thumbnail_appears() {
        let mut h = Harness::bound();
        h.recorder.forget();

        let request = h.select(Some(cat())).expect("image should request a load");
        assert_eq!(request.mime_type(), "image/png");
        assert!(!h.recorder.is_visible(Slot::PreviewImage));

        assert!(h.image_loaded(&request, &[1, 2, 3]));
        assert!(h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(
            h.recorder.background.borrow().as_deref(),
            Some("data:image/png;base64,AQID")
        );

        let journal = h.recorder.journal.borrow();
        let change_at = journal
            .iter()
            .position(|op| *op == Op::Notified(Notification::Change(cat())))
            .unwrap();
        let shown_at = journal
            .iter()
            .position(|op| *op == Op::Visible(Slot::PreviewImage, true))
            .unwrap();
        let background_at = journal
            .iter()
            .position(|op| matches!(op, Op::Background(Some(_))))
            .unwrap();
        assert!(change_at < shown_at);
        assert!(change_at < background_at);
    }

    #[test]
    fn clear_after_image_restores_empty_state() {
        let mut h = Harness::bound();
        let request = h.select(Some(cat())).unwrap();
        h.image_loaded(&request, b"png");
        *h.recorder.input_value.borrow_mut() = Some("C:\\fakepath\\cat.png".to_string());
        h.recorder.forget();

        h.clear();

        assert_eq!(h.dropzone.state(), &State::Empty);
        assert!(h.recorder.is_visible(Slot::Input));
        assert!(h.recorder.is_visible(Slot::Placeholder));
        assert!(!h.recorder.is_visible(Slot::Preview));
        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(*h.recorder.background.borrow(), None);
        assert_eq!(*h.recorder.filename.borrow(), "");
        assert_eq!(*h.recorder.input_value.borrow(), None);
        assert_eq!(h.recorder.notifications(), vec![Notification::Clear]);

        h.recorder.forget();
        assert!(h.select(Some(cat())).is_some());
        assert_eq!(h.recorder.notifications(), vec![Notification::Change(cat())]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut h = Harness::bound();
        h.select(Some(pdf()));

        h.clear();
        let once = h.recorder.snapshot();
        h.clear();

        assert_eq!(h.recorder.snapshot(), once);
        assert_eq!(h.dropzone.state(), &State::Empty);
    }

    #[test]
    fn empty_selection_keeps_previous_file() {
        let mut h = Harness::bound();
        h.select(Some(pdf()));
        let before = h.recorder.snapshot();
        h.recorder.forget();

        assert!(h.select(None).is_none());

        assert_eq!(h.dropzone.selected(), Some(&pdf()));
        assert_eq!(h.recorder.snapshot(), before);
        assert!(h.recorder.journal.borrow().is_empty());
    }

    #[test]
    fn new_selection_replaces_previous_file() {
        let mut h = Harness::bound();
        let request = h.select(Some(cat())).unwrap();
        assert!(h.image_loaded(&request, b"png"));
        h.select(Some(pdf()));

        assert_eq!(h.dropzone.selected(), Some(&pdf()));
        assert_eq!(*h.recorder.filename.borrow(), "doc.pdf");
        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(*h.recorder.background.borrow(), None);
    }

    #[test]
    fn pending_image_does_not_show_previous_thumbnail() {
        let mut h = Harness::bound();
        let first = h.select(Some(cat())).unwrap();
        h.image_loaded(&first, b"png");

        let second = h
            .select(Some(SelectedFile::new("dog.gif", "image/gif")))
            .unwrap();

        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(*h.recorder.background.borrow(), None);

        h.dropzone.image_failed(&second);
        assert_eq!(*h.recorder.background.borrow(), None);
    }

    #[test]
    fn stale_load_after_reselect_is_ignored() {
        let mut h = Harness::bound();
        let stale = h.select(Some(cat())).unwrap();
        h.select(Some(pdf()));

        assert!(!h.image_loaded(&stale, b"late"));

        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(*h.recorder.background.borrow(), None);
    }

    #[test]
    fn stale_load_after_clear_is_ignored() {
        let mut h = Harness::bound();
        let stale = h.select(Some(cat())).unwrap();
        h.clear();

        assert!(!h.image_loaded(&stale, b"late"));
        assert!(!h.recorder.is_visible(Slot::PreviewImage));
    }

    #[test]
    fn only_latest_of_two_images_is_shown() {
        let mut h = Harness::bound();
        let first = h.select(Some(cat())).unwrap();
        let second = h
            .select(Some(SelectedFile::new("dog.gif", "image/gif")))
            .unwrap();
        assert!(second.generation() > first.generation());

        assert!(h.image_loaded(&second, b"GIF"));
        assert!(!h.image_loaded(&first, b"PNG"));

        assert_eq!(
            h.recorder.background.borrow().as_deref(),
            Some("data:image/gif;base64,R0lG")
        );
    }

    #[test]
    fn detach_invalidates_pending_loads() {
        let mut h = Harness::bound();
        let request = h.select(Some(cat())).unwrap();
        h.recorder.forget();

        h.dropzone.detach();

        assert!(!h.image_loaded(&request, b"png"));
        assert!(h.recorder.journal.borrow().is_empty());
    }

    #[test]
    fn failed_load_keeps_thumbnail_hidden() {
        let mut h = Harness::bound();
        let request = h.select(Some(cat())).unwrap();
        h.recorder.forget();

        h.dropzone.image_failed(&request);
        h.flush();

        assert!(!h.recorder.is_visible(Slot::PreviewImage));
        assert_eq!(*h.recorder.background.borrow(), None);
        assert!(h.recorder.notifications().is_empty());
    }

    #[test]
    fn visibility_invariants_hold_across_transitions() {
        let mut h = Harness::bound();
        let files = [pdf(), cat(), SelectedFile::new("raw", "")];

        assert_complementary(&h.recorder);
        for round in 0..files.len() * 3 {
            match round % 3 {
                0 => {
                    let file = files[round / 3].clone();
                    let is_image = file.is_image();
                    if let Some(request) = h.select(Some(file)) {
                        h.image_loaded(&request, b"bytes");
                    }
                    assert_eq!(h.recorder.is_visible(Slot::PreviewImage), is_image);
                }
                1 => {
                    h.select(None);
                }
                _ => h.clear(),
            }

            assert_complementary(&h.recorder);
            if !h.dropzone.selected().map_or(false, SelectedFile::is_image) {
                assert!(!h.recorder.is_visible(Slot::PreviewImage));
            }
        }
    }
}
