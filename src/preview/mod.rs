//! Read-only snapshot of what the tool wants drawn.

use crate::config::ToolConfig;
use crate::math::Point3;
use crate::pick::{PickSlot, Step};
use crate::solver::{RotaScale, TransformPolicy};

/// Which pair of picks a preview line joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Anchor to second reference point.
    Reference,
    /// Anchor to target point.
    Target,
}

/// A line segment to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub kind: LineKind,
    pub start: Point3,
    pub end: Point3,
    pub width: f64,
}

/// Text drawn at a model point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub anchor: Point3,
    pub text: String,
}

/// Markers, lines and readout text for the current picks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preview {
    pub markers: Vec<Point3>,
    pub lines: Vec<PreviewLine>,
    pub label: Option<Label>,
}

impl Preview {
    /// Builds the snapshot for the given slots.
    ///
    /// The line currently being picked is drawn thick while an inference
    /// lock is active. The readout label appears once the target is valid.
    #[must_use]
    pub fn build(
        step: Step,
        slots: [&PickSlot; 3],
        inference_locked: bool,
        config: &ToolConfig,
    ) -> Self {
        let [reference1, reference2, target] = slots;
        let mut preview = Self::default();

        let Some(anchor) = reference1.valid_point() else {
            return preview;
        };
        if reference1.displayable {
            preview.markers.push(anchor);
        }

        let live_width = if inference_locked {
            config.locked_line_width
        } else {
            config.line_width
        };

        let Some(reference) = reference2.valid_point() else {
            return preview;
        };
        if reference2.displayable {
            preview.markers.push(reference);
        }
        preview.lines.push(PreviewLine {
            kind: LineKind::Reference,
            start: anchor,
            end: reference,
            width: if step == Step::AwaitingReference2 {
                live_width
            } else {
                config.line_width
            },
        });

        let Some(end) = target.valid_point() else {
            return preview;
        };
        if target.displayable {
            preview.markers.push(end);
        }
        preview.lines.push(PreviewLine {
            kind: LineKind::Target,
            start: anchor,
            end,
            width: live_width,
        });

        preview.label = RotaScale::new(anchor, reference, end, TransformPolicy::default())
            .readout(config.angle_precision, config.scale_precision)
            .ok()
            .map(|readout| Label {
                anchor,
                text: readout.to_string(),
            });

        preview
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.lines.is_empty() && self.label.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Pick;

    fn slot(x: f64, y: f64, displayable: bool) -> PickSlot {
        PickSlot::from_pick(Pick {
            point: Point3::new(x, y, 0.0),
            valid: true,
            displayable,
        })
    }

    #[test]
    fn nothing_without_anchor() {
        let cleared = PickSlot::cleared();
        let preview = Preview::build(
            Step::AwaitingReference1,
            [&cleared, &cleared, &cleared],
            false,
            &ToolConfig::default(),
        );
        assert!(preview.is_empty());
    }

    #[test]
    fn hidden_anchor_has_no_marker() {
        let cleared = PickSlot::cleared();
        let anchor = slot(0.0, 0.0, false);
        let preview = Preview::build(
            Step::AwaitingReference1,
            [&anchor, &cleared, &cleared],
            false,
            &ToolConfig::default(),
        );
        assert!(preview.is_empty());
    }

    #[test]
    fn reference_line_is_thick_while_locked() {
        let cleared = PickSlot::cleared();
        let anchor = slot(0.0, 0.0, true);
        let reference = slot(5.0, 0.0, true);
        let preview = Preview::build(
            Step::AwaitingReference2,
            [&anchor, &reference, &cleared],
            true,
            &ToolConfig::default(),
        );
        assert_eq!(preview.markers.len(), 2);
        assert_eq!(preview.lines.len(), 1);
        assert!((preview.lines[0].width - 3.0).abs() < f64::EPSILON);
        assert!(preview.label.is_none());
    }

    #[test]
    fn target_adds_thin_reference_and_label() {
        let anchor = slot(0.0, 0.0, true);
        let reference = slot(10.0, 0.0, true);
        let target = slot(0.0, 20.0, false);
        let preview = Preview::build(
            Step::AwaitingTarget,
            [&anchor, &reference, &target],
            true,
            &ToolConfig::default(),
        );

        assert_eq!(preview.markers.len(), 2);
        assert_eq!(preview.lines[0].kind, LineKind::Reference);
        assert!((preview.lines[0].width - 1.0).abs() < f64::EPSILON);
        assert_eq!(preview.lines[1].kind, LineKind::Target);
        assert!((preview.lines[1].width - 3.0).abs() < f64::EPSILON);

        let label = preview.label.unwrap_or_else(|| panic!("missing label"));
        assert_eq!(label.text, "Angle: 90.0° - Scale: 2.0");
        assert_eq!(label.anchor, Point3::new(0.0, 0.0, 0.0));
    }
}
