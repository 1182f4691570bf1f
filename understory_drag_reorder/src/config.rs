// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use kurbo::Size;

use crate::UsageError;

/// Minimum drag distance used when neither the configuration nor the host provides one.
pub const DEFAULT_DRAG_DISTANCE: Size = Size::new(4.0, 4.0);

/// Plain-data settings of a [`DragReorderController`](crate::DragReorderController).
///
/// Callback settings (drag precondition, drop handler) live on the controller
/// itself. None of these may change while a drag is running.
#[derive(Clone, Debug, PartialEq)]
pub struct DragReorderConfig {
    /// Opacity of the drag proxy, in `[0, 1]`.
    ///
    /// Has no effect when `show_adorner` is false.
    pub adorner_opacity: f64,
    /// Whether a proxy of the dragged row follows the pointer.
    pub show_adorner: bool,
    /// Horizontal distance the pointer must travel before a press becomes a drag.
    ///
    /// `None` uses the host's system drag distance. `f64::INFINITY` prevents
    /// horizontal movement from ever starting a drag.
    pub min_horizontal_drag_distance: Option<f64>,
    /// Vertical distance the pointer must travel before a press becomes a drag.
    ///
    /// `None` uses the host's system drag distance. `f64::INFINITY` prevents
    /// vertical movement from ever starting a drag.
    pub min_vertical_drag_distance: Option<f64>,
}

impl Default for DragReorderConfig {
    fn default() -> Self {
        Self {
            adorner_opacity: 0.7,
            show_adorner: true,
            min_horizontal_drag_distance: None,
            min_vertical_drag_distance: None,
        }
    }
}

impl DragReorderConfig {
    /// Set the proxy opacity.
    #[must_use]
    pub fn with_adorner_opacity(mut self, opacity: f64) -> Self {
        self.adorner_opacity = opacity;
        self
    }

    /// Enable or disable the proxy.
    #[must_use]
    pub fn with_show_adorner(mut self, show: bool) -> Self {
        self.show_adorner = show;
        self
    }

    /// Override both minimum drag distances.
    #[must_use]
    pub fn with_min_drag_distance(
        mut self,
        horizontal: Option<f64>,
        vertical: Option<f64>,
    ) -> Self {
        self.min_horizontal_drag_distance = horizontal;
        self.min_vertical_drag_distance = vertical;
        self
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), UsageError> {
        validate_opacity(self.adorner_opacity)?;
        validate_distance(self.min_horizontal_drag_distance)?;
        validate_distance(self.min_vertical_drag_distance)
    }

    /// Whether a drag shows a proxy at all.
    pub fn shows_proxy(&self) -> bool {
        self.show_adorner && self.adorner_opacity > 0.0
    }

    /// Effective minimum drag distance, falling back to `system` per axis.
    pub fn drag_distance(&self, system: Size) -> Size {
        Size::new(
            self.min_horizontal_drag_distance.unwrap_or(system.width),
            self.min_vertical_drag_distance.unwrap_or(system.height),
        )
    }
}

pub(crate) fn validate_opacity(value: f64) -> Result<(), UsageError> {
    // Written to also reject NaN.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(UsageError::OpacityOutOfRange { value })
    }
}

pub(crate) fn validate_distance(value: Option<f64>) -> Result<(), UsageError> {
    match value {
        Some(value) if value.is_nan() || value < 0.0 => {
            Err(UsageError::InvalidDragDistance { value })
        }
        _ => Ok(()),
    }
}
