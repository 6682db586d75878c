//! Floating-point geometric primitives.

mod circle2;
mod point2;
mod segment2;
mod vec2;

pub use circle2::Circle2;
pub use point2::Point2;
pub use segment2::Segment2;
pub use vec2::Vec2;
