//! Page selection: range expressions, bounds filtering and rotation
//! requests.

pub mod range;
pub mod rotation;
pub mod selector;

pub use range::{PageIndex, PageRangeSet};
pub use rotation::{Angle, Direction, RotationSpec, RotationTarget, accumulate};
pub use selector::select;
