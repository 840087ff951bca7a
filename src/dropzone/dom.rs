//! Binding of a [`Dropzone`] onto real DOM elements.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Element, HtmlElement, HtmlInputElement};

use super::error::BindingError;
use super::file::SelectedFile;
use super::notify::{Notification, SubscriptionId, Subscribers};
use super::options::DropzoneOptions;
use super::preview::{self, NO_BACKGROUND};
use super::slots::{Slot, SlotMap};
use super::widget::{Dropzone, ImageRequest, Surface};

/// The six slot elements of one dropzone, styled through inline CSS.
pub struct DomSurface {
    slots: SlotMap<HtmlElement>,
    input: HtmlInputElement,
    options: DropzoneOptions,
}

impl DomSurface {
    pub fn resolve(root: &Element, options: DropzoneOptions) -> Result<Self, BindingError> {
        let found = SlotMap::resolve(|slot| {
            root.query_selector(&options.selector_for(slot))
                .ok()
                .flatten()
        })?;

        let html = |slot: Slot| {
            found
                .get(slot)
                .clone()
                .dyn_into::<HtmlElement>()
                .map_err(|_| BindingError::WrongElement {
                    slot,
                    expected: "an HTML element",
                })
        };
        let slots = SlotMap {
            input: html(Slot::Input)?,
            placeholder: html(Slot::Placeholder)?,
            preview: html(Slot::Preview)?,
            preview_clear_button: html(Slot::PreviewClearButton)?,
            preview_filename: html(Slot::PreviewFilename)?,
            preview_image: html(Slot::PreviewImage)?,
        };

        let input = slots
            .input
            .clone()
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| BindingError::WrongElement {
                slot: Slot::Input,
                expected: "an <input type=\"file\"> element",
            })?;

        Ok(Self {
            slots,
            input,
            options,
        })
    }

    pub fn element(&self, slot: Slot) -> &HtmlElement {
        self.slots.get(slot)
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    fn set_style(&self, slot: Slot, property: &str, value: &str) {
        if let Err(err) = self.element(slot).style().set_property(property, value) {
            warn!(%slot, property, ?err, "could not update dropzone style");
        }
    }
}

impl Surface for DomSurface {
    fn set_visible(&self, slot: Slot, visible: bool) {
        let display = if visible {
            self.options.display_for(slot)
        } else {
            "none"
        };
        self.set_style(slot, "display", display);
    }

    fn set_filename(&self, text: &str) {
        self.slots.preview_filename.set_text_content(Some(text));
    }

    fn set_background_image(&self, uri: Option<&str>) {
        let value = uri.map_or_else(|| NO_BACKGROUND.to_string(), preview::background_image);
        self.set_style(Slot::PreviewImage, "background-image", &value);
    }

    fn reset_input(&self) {
        self.input.set_value("");
    }
}

struct Shared {
    dropzone: RefCell<Dropzone<DomSurface>>,
    subscribers: Subscribers,
}

impl Shared {
    /// Runs `action` on the widget, then publishes what it emitted once the
    /// widget is no longer borrowed, so subscribers may call back in.
    fn apply<R>(&self, action: impl FnOnce(&mut Dropzone<DomSurface>) -> R) -> R {
        let (result, notifications) = {
            let mut dropzone = self.dropzone.borrow_mut();
            let result = action(&mut dropzone);
            (result, dropzone.take_notifications())
        };

        for notification in &notifications {
            self.subscribers.publish(notification);
        }
        result
    }
}

/// A dropzone bound to a DOM subtree.
///
/// Dropping the controller (or calling `disconnect` from JS) removes its
/// listeners and discards thumbnail loads still in flight.
#[wasm_bindgen]
pub struct DropzoneController {
    root: Element,
    shared: Rc<Shared>,
    dispatch: SubscriptionId,
    _listeners: Vec<EventListener>,
}

impl DropzoneController {
    /// Binds to the slots found under `root`, then clears and announces the
    /// widget. Listeners already in `subscribers` see the initial `clear`
    /// and `connect`.
    pub fn bind(
        root: &Element,
        options: DropzoneOptions,
        subscribers: Subscribers,
    ) -> Result<Self, BindingError> {
        let surface = DomSurface::resolve(root, options.clone())?;
        let dispatch = subscribers.subscribe(dom_dispatcher(root.clone(), options.event_prefix));

        let clear_button = surface.element(Slot::PreviewClearButton).clone();
        let input = surface.input().clone();
        let shared = Rc::new(Shared {
            dropzone: RefCell::new(Dropzone::new(surface)),
            subscribers,
        });

        let on_clear = {
            let shared = Rc::downgrade(&shared);
            EventListener::new(&clear_button, "click", move |_event| {
                if let Some(shared) = shared.upgrade() {
                    shared.apply(|dropzone| dropzone.clear());
                }
            })
        };

        let on_change = {
            let shared = Rc::downgrade(&shared);
            let target = input.clone();
            EventListener::new(&input, "change", move |_event| {
                if let Some(shared) = shared.upgrade() {
                    on_selection_change(&shared, &target);
                }
            })
        };

        shared.apply(|dropzone| dropzone.connect());

        Ok(Self {
            root: root.clone(),
            shared,
            dispatch,
            _listeners: vec![on_clear, on_change],
        })
    }

    pub fn subscribers(&self) -> &Subscribers {
        &self.shared.subscribers
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn selected(&self) -> Option<SelectedFile> {
        self.shared.dropzone.borrow().selected().cloned()
    }
}

#[wasm_bindgen]
impl DropzoneController {
    /// Binds to `root`, reading options from its `data-dropzone-*` attributes.
    #[wasm_bindgen(constructor)]
    pub fn new(root: Element) -> Result<DropzoneController, JsError> {
        let options = DropzoneOptions::from_element(&root);
        Ok(Self::bind(&root, options, Subscribers::new())?)
    }

    pub fn clear(&self) {
        self.shared.apply(|dropzone| dropzone.clear());
    }

    #[wasm_bindgen(getter, js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.shared.dropzone.borrow().selected().is_none()
    }

    #[wasm_bindgen(getter, js_name = selectedName)]
    pub fn selected_name(&self) -> Option<String> {
        self.selected().map(|file| file.name)
    }

    #[wasm_bindgen(getter, js_name = selectedMimeType)]
    pub fn selected_mime_type(&self) -> Option<String> {
        self.selected().map(|file| file.mime_type)
    }

    /// Releases the listeners; same as letting the controller be dropped.
    pub fn disconnect(self) {}
}

impl Drop for DropzoneController {
    fn drop(&mut self) {
        self.shared.subscribers.unsubscribe(self.dispatch);
        self.shared.dropzone.borrow_mut().detach();
    }
}

fn on_selection_change(shared: &Rc<Shared>, input: &HtmlInputElement) {
    let file = input.files().and_then(|files| files.get(0));
    let selected = file.as_ref().map(SelectedFile::from);

    let request = shared.apply(|dropzone| dropzone.select(selected));

    if let (Some(request), Some(file)) = (request, file) {
        load_thumbnail(Rc::downgrade(shared), request, file);
    }
}

fn file_reader_available() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("FileReader")).unwrap_or(false)
}

fn load_thumbnail(shared: Weak<Shared>, request: ImageRequest, file: web_sys::File) {
    if !file_reader_available() {
        debug!("FileReader unavailable, skipping thumbnail");
        return;
    }

    wasm_bindgen_futures::spawn_local(async move {
        let file = gloo::file::File::from(file);
        let result = gloo::file::futures::read_as_bytes(&file).await;

        let Some(shared) = shared.upgrade() else {
            return;
        };
        match result {
            Ok(bytes) => {
                shared.apply(|dropzone| dropzone.image_loaded(&request, &bytes));
            }
            Err(err) => {
                warn!(error = %err, name = %file.name(), "could not read file for preview");
                shared.apply(|dropzone| dropzone.image_failed(&request));
            }
        }
    });
}

/// Re-publishes notifications as `CustomEvent`s on `root`.
fn dom_dispatcher(root: Element, prefix: String) -> impl Fn(&Notification) {
    move |notification: &Notification| {
        let event_type = notification.event_type(&prefix);
        let init = CustomEventInit::new();
        if let Some(file) = notification.file() {
            init.set_detail(&file_detail(file));
        }

        let dispatched = CustomEvent::new_with_event_init_dict(&event_type, &init)
            .and_then(|event| root.dispatch_event(&event));
        if let Err(err) = dispatched {
            warn!(%event_type, ?err, "could not dispatch dropzone event");
        }
    }
}

fn file_detail(file: &SelectedFile) -> JsValue {
    let detail = js_sys::Object::new();
    for (key, value) in [("name", &file.name), ("mimeType", &file.mime_type)] {
        if let Err(err) = js_sys::Reflect::set(
            &detail,
            &JsValue::from_str(key),
            &JsValue::from_str(value),
        ) {
            warn!(key, ?err, "could not fill dropzone event detail");
        }
    }
    detail.into()
}
