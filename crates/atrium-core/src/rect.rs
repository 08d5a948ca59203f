//! Rectangle helpers for damage-region accumulation.
//!
//! `embedded_graphics::primitives::Rectangle` provides intersection and
//! point containment; the union needed to merge invalidated regions is
//! built here.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Smallest rectangle containing both inputs.
///
/// A zero-sized rectangle contributes nothing: the other argument is
/// returned unchanged, so unions can start from `Rectangle::zero()`.
///
/// # Examples
///
/// ```
/// use atrium_core::rect::union;
/// use embedded_graphics::prelude::*;
/// use embedded_graphics::primitives::Rectangle;
///
/// let a = Rectangle::new(Point::new(0, 0), Size::new(10, 10));
/// let b = Rectangle::new(Point::new(20, 5), Size::new(10, 10));
/// let merged = union(&a, &b);
/// assert_eq!(merged.top_left, Point::new(0, 0));
/// assert_eq!(merged.size, Size::new(30, 15));
/// ```
pub fn union(a: &Rectangle, b: &Rectangle) -> Rectangle {
    if a.size.width == 0 || a.size.height == 0 {
        return *b;
    }
    if b.size.width == 0 || b.size.height == 0 {
        return *a;
    }

    let top_left = Point::new(a.top_left.x.min(b.top_left.x), a.top_left.y.min(b.top_left.y));
    let a_end = bottom_right_exclusive(a);
    let b_end = bottom_right_exclusive(b);
    let bottom_right = Point::new(a_end.x.max(b_end.x), a_end.y.max(b_end.y));

    Rectangle::new(
        top_left,
        Size::new(
            bottom_right.x.saturating_sub(top_left.x).unsigned_abs(),
            bottom_right.y.saturating_sub(top_left.y).unsigned_abs(),
        ),
    )
}

/// Exclusive bottom-right corner of a rectangle.
// SAFETY: screen coordinates are display pixel counts (max ~4000); adding a
// u32 size cast to i32 cannot overflow i32.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
fn bottom_right_exclusive(r: &Rectangle) -> Point {
    Point::new(
        r.top_left.x + r.size.width as i32,
        r.top_left.y + r.size.height as i32,
    )
}

/// Translate a rectangle by an offset without changing its size.
// SAFETY: both operands are on-screen pixel coordinates; the sum stays far
// below i32::MAX.
#[allow(clippy::arithmetic_side_effects)]
pub fn translate(r: &Rectangle, offset: Point) -> Rectangle {
    Rectangle::new(r.top_left + offset, r.size)
}
