use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::host::{
    InferenceLock, Pick, PickResolver, PreviewRenderer, ScreenEvent, SelectionApplier, StatusSink,
};
use crate::math::{Matrix4, Point3, TOLERANCE};
use crate::preview::Preview;

use super::{Scene, Selection};

/// Viewport and inference parameters of a [`Workspace`].
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceConfig {
    /// Model units covered by one screen pixel.
    pub units_per_pixel: f64,
    /// Picks within this model distance of a scene vertex snap to it.
    pub snap_radius: f64,
    /// Viewport size in pixels; events outside resolve to invalid picks.
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            units_per_pixel: 1.0,
            snap_radius: 0.5,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
        }
    }
}

impl WorkspaceConfig {
    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the scale or viewport is not positive, or the
    /// snap radius is negative.
    pub fn validate(&self) -> Result<()> {
        if self.units_per_pixel <= 0.0 {
            return Err(
                OperationError::InvalidInput("units per pixel must be positive".to_owned()).into(),
            );
        }
        if self.snap_radius < 0.0 {
            return Err(OperationError::InvalidInput(
                "snap radius must not be negative".to_owned(),
            )
            .into());
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(
                OperationError::InvalidInput("viewport must not be empty".to_owned()).into(),
            );
        }
        Ok(())
    }
}

/// A transform the workspace applied to its scene.
#[derive(Debug, Clone)]
pub struct AppliedOperation {
    pub name: String,
    pub matrix: Matrix4,
    pub selection: Selection,
}

/// Reference host: a [`Scene`] seen through a top-down viewport on the
/// z = 0 plane.
#[derive(Debug, Default)]
pub struct Workspace {
    config: WorkspaceConfig,
    scene: Scene,
    selection: Selection,
    lock: Option<Vec<Point3>>,
    status: Option<String>,
    tooltip: Option<String>,
    operations: Vec<AppliedOperation>,
    last_preview: Option<Preview>,
}

impl Workspace {
    /// Creates a workspace around `scene`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(scene: Scene, config: WorkspaceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scene,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replaces the current selection.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }

    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Transforms applied so far, oldest first.
    #[must_use]
    pub fn operations(&self) -> &[AppliedOperation] {
        &self.operations
    }

    #[must_use]
    pub fn last_preview(&self) -> Option<&Preview> {
        self.last_preview.as_ref()
    }

    fn to_model(&self, event: &ScreenEvent) -> Option<Point3> {
        let inside = (0.0..=self.config.viewport_width).contains(&event.x)
            && (0.0..=self.config.viewport_height).contains(&event.y);
        inside.then(|| {
            Point3::new(
                event.x * self.config.units_per_pixel,
                event.y * self.config.units_per_pixel,
                0.0,
            )
        })
    }

    /// Nearest scene vertex within the snap radius, or `point` itself.
    fn snap(&self, point: Point3) -> Point3 {
        self.scene
            .vertices()
            .map(|v| (v, (v - point).norm()))
            .filter(|(_, d)| *d <= self.config.snap_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(point, |(v, _)| *v)
    }

    /// Applies the inference lock: a single point pins the pick, two points
    /// constrain it to the line through them.
    fn constrain(&self, point: Point3) -> Point3 {
        match self.lock.as_deref() {
            Some([fixed]) => *fixed,
            Some([a, b, ..]) => {
                let dir = b - a;
                let len_sq = dir.norm_squared();
                if len_sq < TOLERANCE * TOLERANCE {
                    return *a;
                }
                a + dir * ((point - a).dot(&dir) / len_sq)
            }
            _ => point,
        }
    }
}

impl PickResolver for Workspace {
    fn resolve(&mut self, event: &ScreenEvent, hints: &[Point3]) -> Pick {
        let Some(raw) = self.to_model(event) else {
            trace!(?event, "pick outside viewport");
            return Pick {
                point: Point3::origin(),
                valid: false,
                displayable: false,
            };
        };
        let point = self.constrain(self.snap(raw));
        let displayable = hints
            .first()
            .map_or(true, |hint| (point - hint).norm() >= TOLERANCE);
        Pick {
            point,
            valid: true,
            displayable,
        }
    }
}

impl InferenceLock for Workspace {
    fn lock(&mut self, points: &[Point3]) {
        self.lock = (!points.is_empty()).then(|| points.to_vec());
    }

    fn unlock(&mut self) {
        self.lock = None;
    }

    fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
}

impl StatusSink for Workspace {
    fn set_status_text(&mut self, text: &str) {
        self.status = Some(text.to_owned());
    }

    fn set_tooltip(&mut self, text: Option<&str>) {
        self.tooltip = text.map(str::to_owned);
    }
}

impl SelectionApplier for Workspace {
    type Selection = Selection;

    fn selection(&self) -> Selection {
        self.selection.clone()
    }

    fn apply_transform(
        &mut self,
        operation: &str,
        matrix: &Matrix4,
        selection: &Selection,
    ) -> Result<()> {
        self.scene.transform_entities(matrix, selection)?;
        debug!(operation, entities = selection.len(), "operation committed");
        self.operations.push(AppliedOperation {
            name: operation.to_owned(),
            matrix: *matrix,
            selection: selection.clone(),
        });
        Ok(())
    }
}

impl PreviewRenderer for Workspace {
    fn render(&mut self, preview: &Preview) {
        self.last_preview = Some(preview.clone());
    }
}
