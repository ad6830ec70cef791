pub mod device;
pub mod geometry;
pub mod paper;
pub mod stacking;

pub use device::InputMode;
pub use geometry::Vec2;
pub use paper::{MouseButton, PaperGesture, PaperTransform};
pub use stacking::StackOrder;
