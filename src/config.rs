use std::time::Duration;

use crate::error::{OperationError, Result};

/// Parameters controlling the pick tool's behaviour and feedback.
#[derive(Debug, Clone, Copy)]
pub struct ToolConfig {
    /// Holding the constrain key longer than this releases the inference
    /// lock on key-up; shorter presses act as a toggle.
    pub lock_hold_threshold: Duration,
    /// Decimal digits of the angle readout (degrees).
    pub angle_precision: i32,
    /// Decimal digits of the scale readout.
    pub scale_precision: i32,
    /// Width of preview lines.
    pub line_width: f64,
    /// Width of the line being picked while an inference lock is active.
    pub locked_line_width: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            lock_hold_threshold: Duration::from_millis(500),
            angle_precision: 1,
            scale_precision: 3,
            line_width: 1.0,
            locked_line_width: 3.0,
        }
    }
}

impl ToolConfig {
    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if a precision is negative or a line width is not
    /// positive.
    pub fn validate(&self) -> Result<()> {
        if self.angle_precision < 0 || self.scale_precision < 0 {
            return Err(OperationError::InvalidInput(
                "readout precision must not be negative".to_owned(),
            )
            .into());
        }
        if self.line_width <= 0.0 || self.locked_line_width <= 0.0 {
            return Err(
                OperationError::InvalidInput("line width must be positive".to_owned()).into(),
            );
        }
        Ok(())
    }
}
