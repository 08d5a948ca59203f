//! Rounded integer percentage math.
//!
//! Sliders and scrollbars map touch positions to values and back using
//! whole-number percentages. All intermediate math widens to `u64`, so
//! the helpers are total for any `u32` inputs; rounding is half-up.

/// Percentage (0–100) that `part` is of `whole`, rounded half-up.
///
/// A zero `whole` yields 0 rather than dividing.
///
/// # Examples
///
/// ```
/// use atrium_widgets::percent::percent_whole_rounded;
///
/// assert_eq!(percent_whole_rounded(1, 3), 33);
/// assert_eq!(percent_whole_rounded(2, 3), 67); // rounds up
/// assert_eq!(percent_whole_rounded(5, 5), 100);
/// assert_eq!(percent_whole_rounded(0, 0), 0);
/// ```
// SAFETY: operands are widened to u64; u32::MAX * 100 fits comfortably.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
#[must_use]
pub fn percent_whole_rounded(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    ((part * 100 + whole / 2) / whole) as u32
}

/// `percent` (0–100) of `whole`, rounded half-up.
///
/// # Examples
///
/// ```
/// use atrium_widgets::percent::percent_of;
///
/// assert_eq!(percent_of(200, 50), 100);
/// assert_eq!(percent_of(3, 50), 2); // 1.5 rounds up
/// assert_eq!(percent_of(0, 100), 0);
/// ```
// SAFETY: operands are widened to u64; u32::MAX * 100 fits comfortably.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
#[must_use]
pub fn percent_of(whole: u32, percent: u32) -> u32 {
    ((u64::from(whole) * u64::from(percent) + 50) / 100) as u32
}
