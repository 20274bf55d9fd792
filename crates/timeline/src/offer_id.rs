//! Offer id allocation (`OF001`, `OF002`, ...).

use tradeline_core::{DomainError, DomainResult, EventId};
use tradeline_events::{Event, TimelineEvent};

pub const OFFER_ID_PREFIX: &str = "OF";

/// Hands out offer ids for one timeline.
///
/// Ids keep the human-readable `OF` + zero-padded sequence convention, but the
/// sequence is monotonic: it starts above both the number of offers and the
/// highest `OF` sequence already present, never goes back after a delete, and
/// skips any candidate some event already uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferIdAllocator {
    last_issued: u64,
}

impl OfferIdAllocator {
    pub fn seeded_from(events: &[TimelineEvent]) -> Self {
        let offer_count = events.iter().filter(|e| e.is_offer()).count() as u64;
        let highest = events
            .iter()
            .filter_map(|e| offer_sequence(e.event_id()))
            .max()
            .unwrap_or(0);

        Self {
            last_issued: offer_count.max(highest),
        }
    }

    /// Sequence number of the most recently issued (or seeded) id.
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }

    /// Allocate the next id not used by any event in `events`.
    ///
    /// Fails once the sequence is exhausted (a fixture can seed it at
    /// `u64::MAX` with an id like `OF18446744073709551615`); the allocator is
    /// left unchanged in that case.
    pub fn next_id(&mut self, events: &[TimelineEvent]) -> DomainResult<EventId> {
        let mut sequence = self.last_issued;
        loop {
            sequence = sequence.checked_add(1).ok_or_else(|| {
                DomainError::invalid_input("offer id sequence exhausted")
            })?;
            let candidate = format_offer_id(sequence);
            if !events.iter().any(|e| e.event_id() == &candidate) {
                self.last_issued = sequence;
                return Ok(candidate);
            }
        }
    }
}

/// `OF` followed by the sequence, zero-padded to three digits.
pub fn format_offer_id(sequence: u64) -> EventId {
    EventId::new(format!("{OFFER_ID_PREFIX}{sequence:03}"))
}

/// Sequence number of an `OF<digits>` id, if it is one.
pub fn offer_sequence(id: &EventId) -> Option<u64> {
    let digits = id.as_str().strip_prefix(OFFER_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
