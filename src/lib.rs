pub mod config;
pub mod error;
pub mod host;
pub mod math;
pub mod pick;
pub mod preview;
pub mod scene;
pub mod solver;

pub use config::ToolConfig;
pub use error::{Result, RotaScaleError};
pub use pick::{ClickOutcome, PickSequence, Step};
pub use solver::{RotaScale, Solution, TransformPolicy, TransformResult};
