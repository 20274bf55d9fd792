use tradeline_core::{EventDate, EventId};

/// A timeline event.
///
/// Events are:
/// - **facts** about the trade (a payment fell due, goods shipped, financing
///   was offered)
/// - **identified** by an `event_id` unique across the whole timeline
/// - **dated** by a calendar day, which is the only ordering key
pub trait Event: Clone + core::fmt::Debug {
    /// Wire discriminator (the `event_type` field, e.g. `"Financial Event"`).
    fn event_type(&self) -> &'static str;

    fn event_id(&self) -> &EventId;

    /// Business date of the event.
    fn event_date(&self) -> &EventDate;
}
