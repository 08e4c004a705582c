mod latch;
mod sequence;
mod slot;

pub use latch::ConstrainLatch;
pub use sequence::{
    ClickOutcome, PickSequence, Step, STATUS_FIRST_POINT, STATUS_SECOND_POINT, STATUS_THIRD_POINT,
};
pub use slot::PickSlot;
