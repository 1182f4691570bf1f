// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the drag-reorder controller.
//!
//! Only caller mistakes and host misconfiguration are errors. A drop carrying a
//! foreign payload, or a drop onto empty space from inside the same list, is a
//! routine occurrence and resolves to [`DragEffects::NONE`](crate::DragEffects::NONE)
//! instead.

use thiserror::Error;

/// The caller used the controller in a way it does not allow.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum UsageError {
    /// A drag-affecting setting was changed, or the list was rebound, while a drag ran.
    #[error("cannot change `{property}` during a drag operation")]
    DragInProgress {
        /// Name of the setting the caller tried to change.
        property: &'static str,
    },
    /// The drag adorner opacity must lie in `[0, 1]`.
    #[error("drag adorner opacity {value} must be between 0 and 1")]
    OpacityOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// A minimum drag distance must be non-negative (infinity disables the axis).
    #[error("minimum drag distance {value} must be non-negative")]
    InvalidDragDistance {
        /// Rejected value.
        value: f64,
    },
    /// A pointer event arrived while no list was attached.
    #[error("no list is attached to the drag-reorder controller")]
    NotAttached,
}

/// Error returned by pointer and drop handling.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DragReorderError {
    /// See [`UsageError`].
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// The attached list does not expose an ordered, index-addressable items source.
    ///
    /// Raised when a drop tries to mutate the collection. The drag itself still
    /// completes and tears down; only the reorder is refused.
    #[error("the attached list has no reorderable items source")]
    ConfigurationMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn usage_errors_read_well() {
        let err = UsageError::DragInProgress {
            property: "show_adorner",
        };
        assert_eq!(
            err.to_string(),
            "cannot change `show_adorner` during a drag operation"
        );
        let err = UsageError::OpacityOutOfRange { value: 1.5 };
        assert_eq!(
            err.to_string(),
            "drag adorner opacity 1.5 must be between 0 and 1"
        );
    }

    #[test]
    fn usage_error_is_transparent_inside_reorder_error() {
        let err: DragReorderError = UsageError::NotAttached.into();
        assert_eq!(
            err.to_string(),
            "no list is attached to the drag-reorder controller"
        );
        assert_eq!(err, DragReorderError::Usage(UsageError::NotAttached));
    }
}
