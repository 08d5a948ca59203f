//! Error type shared by all tree and widget mutators.

/// Errors returned by fallible toolkit operations.
///
/// Every mutating call validates its arguments up front and fails without
/// partial mutation; a returned error means the tree is exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiError {
    /// The widget handle is stale or was never allocated.
    DeadWidget,
    /// A child index is outside the current child list.
    IndexOutOfRange,
    /// A zero width or height was requested.
    InvalidSize,
    /// A bounded collection (widget slots, child list, event queue,
    /// scheme table, layer set) is at capacity.
    CapacityExceeded,
    /// The operation would make a widget an ancestor of itself.
    CycleDetected,
    /// The widget is not a child of the given parent.
    NotAChild,
    /// Layer roots can only be torn down with their context.
    LayerRoot,
}

#[cfg(feature = "std")]
impl std::error::Error for UiError {}

impl core::fmt::Display for UiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DeadWidget => write!(f, "stale or unallocated widget handle"),
            Self::IndexOutOfRange => write!(f, "child index out of range"),
            Self::InvalidSize => write!(f, "zero width or height"),
            Self::CapacityExceeded => write!(f, "bounded collection is full"),
            Self::CycleDetected => write!(f, "widget cannot become its own ancestor"),
            Self::NotAChild => write!(f, "widget is not a child of the given parent"),
            Self::LayerRoot => write!(f, "layer roots cannot be destroyed directly"),
        }
    }
}

/// Shorthand for toolkit results.
pub type UiResult<T = ()> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            UiError::DeadWidget.to_string(),
            "stale or unallocated widget handle"
        );
        assert_eq!(UiError::InvalidSize.to_string(), "zero width or height");
    }

    #[test]
    fn test_error_is_copy_and_eq() {
        let a = UiError::CapacityExceeded;
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, UiError::CycleDetected);
    }
}
