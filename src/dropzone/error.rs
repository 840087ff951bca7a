use thiserror::Error;

use super::slots::Slot;

/// Raised when a dropzone cannot be bound to its DOM subtree.
///
/// Binding is all-or-nothing: no controller is handed out after one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("dropzone slot `{0}` was not found in the bound subtree")]
    MissingSlot(Slot),

    #[error("dropzone slot `{slot}` must be bound to {expected}")]
    WrongElement { slot: Slot, expected: &'static str },
}
