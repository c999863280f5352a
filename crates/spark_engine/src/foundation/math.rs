//! Math utilities and types
//!
//! Provides the 2D math types used throughout the engine plus the
//! axis-aligned rectangle primitive the collision pass is built on.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// An axis-aligned rectangle described by its top-left corner and size.
///
/// A rectangle with a non-positive width or height is *empty*: it never
/// intersects anything, including itself. Entities with no physical
/// footprint report an empty rectangle to opt out of collision entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// The canonical empty rectangle
    pub const EMPTY: Self = Self {
        origin: Point2::new(0.0, 0.0),
        size: Vec2::new(0.0, 0.0),
    };

    /// Create a rectangle from its top-left corner and size
    pub const fn new(origin: Point2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Create a rectangle centered on `center` with the given size
    pub fn from_center(center: Point2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    /// Left edge x coordinate
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point2 {
        self.origin + self.size / 2.0
    }

    /// Whether the rectangle has a non-positive width or height
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Whether two rectangles overlap.
    ///
    /// Empty rectangles never intersect. Rectangles that merely share an
    /// edge do not count as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Translate the rectangle by the given offset
    pub fn offset(&self, delta: Vec2) -> Self {
        Self {
            origin: self.origin + delta,
            size: self.size,
        }
    }
}
