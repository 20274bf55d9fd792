//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Timeline events are entities: an offer keeps its `event_id` across edits
/// even when every other field changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
