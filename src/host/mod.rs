//! Boundary to the modelling host: picking, inference locking, status
//! feedback, preview drawing and the selection transform.

use std::time::Instant;

use crate::error::Result;
use crate::math::{Matrix4, Point3};
use crate::preview::Preview;

/// Name of the undoable operation the host records for each applied
/// transform.
pub const OPERATION_NAME: &str = "Rotate and Scale";

/// A pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenEvent {
    pub x: f64,
    pub y: f64,
}

impl ScreenEvent {
    /// Creates a new screen event.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Keys the tool reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Toggles or holds an inference lock.
    Constrain,
    /// Suppresses the scale component while held.
    RotationOnly,
    Other(u32),
}

/// A key press or release.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub key: Key,
    /// `true` for auto-repeated presses while the key is held.
    pub repeat: bool,
    pub at: Instant,
}

impl KeyEvent {
    /// Creates a first (non-repeated) key event.
    #[must_use]
    pub fn new(key: Key, at: Instant) -> Self {
        Self {
            key,
            repeat: false,
            at,
        }
    }

    /// Marks the event as auto-repeated.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// A point resolved from a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub point: Point3,
    pub valid: bool,
    /// Whether a marker should be drawn for this pick.
    pub displayable: bool,
}

/// Which cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    RotateScale,
    Rotate,
}

/// Resolves screen positions into model points.
pub trait PickResolver {
    /// Resolves `event`, using `hints` (earlier picks in pick order) to
    /// guide inference.
    fn resolve(&mut self, event: &ScreenEvent, hints: &[Point3]) -> Pick;
}

/// Controls the host's inference lock.
pub trait InferenceLock {
    /// Constrains subsequent picks relative to `points`.
    fn lock(&mut self, points: &[Point3]);
    fn unlock(&mut self);
    fn is_locked(&self) -> bool;
}

/// Receives user feedback text.
pub trait StatusSink {
    fn set_status_text(&mut self, text: &str);
    fn set_tooltip(&mut self, text: Option<&str>);
}

/// Applies the final transform to the host's selection.
pub trait SelectionApplier {
    /// Opaque handle to whatever the host considers selected.
    type Selection;

    /// Returns the current selection.
    fn selection(&self) -> Self::Selection;

    /// Transforms every entity in `selection` as one undoable operation
    /// named `operation`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot transform the selection.
    fn apply_transform(
        &mut self,
        operation: &str,
        matrix: &Matrix4,
        selection: &Self::Selection,
    ) -> Result<()>;
}

/// Draws preview snapshots.
pub trait PreviewRenderer {
    fn render(&mut self, preview: &Preview);
}

/// Everything the pick tool needs from its host.
pub trait Host:
    PickResolver + InferenceLock + StatusSink + SelectionApplier + PreviewRenderer
{
}

impl<T> Host for T where
    T: PickResolver + InferenceLock + StatusSink + SelectionApplier + PreviewRenderer
{
}
