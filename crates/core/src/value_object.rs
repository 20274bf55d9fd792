//! Value object trait: equality by value, not identity.
//!
//! Parties, order details and advance rates carry no identity of their own;
//! two of them with the same attributes are the same value.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attributes. To "change"
/// one, build a new value:
///
/// ```ignore
/// let rate = AdvanceRate::new(0.8)?;
/// let raised = AdvanceRate::new(0.9)?; // a different value, not a mutation
/// assert_ne!(rate, raised);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
