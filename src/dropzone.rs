//! File drop zone with placeholder, filename preview and image thumbnails.
//!
//! [`Dropzone`] holds the selection state machine and is independent of the
//! browser; [`DropzoneController`] binds it onto six elements of a DOM subtree
//! and re-publishes its notifications as `dropzone:*` custom events on the
//! subtree's root.

mod dom;
mod error;
mod file;
mod notify;
mod options;
mod preview;
mod slots;
mod widget;

pub use dom::{DomSurface, DropzoneController};
pub use error::BindingError;
pub use file::SelectedFile;
pub use notify::{Notification, SubscriptionId, Subscribers};
pub use options::{DropzoneOptions, DEFAULT_EVENT_PREFIX, DEFAULT_TARGET_ATTRIBUTE};
pub use preview::{background_image, data_uri};
pub use slots::{Slot, SlotMap};
pub use widget::{Dropzone, ImageRequest, State, Surface};
