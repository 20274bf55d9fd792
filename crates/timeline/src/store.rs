//! In-memory owner of one purchase order's timeline.

use std::sync::Arc;

use tradeline_core::{DomainResult, Entity, EventId};
use tradeline_events::{Command, OfferCommand, OfferEvent, OfferFields, OfferPatch, TimelineEvent};
use tradeline_purchasing::PurchaseOrder;

use crate::offer_id::OfferIdAllocator;
use crate::projector::{DisplayEvent, orphaned_offers, project};
use crate::source::{LoadError, TimelineData, TimelineSource};
use crate::view::TimelineView;

/// Authoritative event collection for the loaded purchase order.
///
/// Only offers can change. Every mutation builds a new collection and swaps it
/// in, so a [`snapshot`](Self::snapshot) taken earlier is never affected by a
/// later edit. Mutations take `&mut self`; there is exactly one writer.
#[derive(Debug, Clone)]
pub struct TimelineStore {
    purchase_order: Option<PurchaseOrder>,
    events: Arc<[TimelineEvent]>,
    offer_ids: OfferIdAllocator,
}

impl Default for TimelineStore {
    fn default() -> Self {
        Self::new(TimelineData::default())
    }
}

impl TimelineStore {
    pub fn new(data: TimelineData) -> Self {
        let offer_ids = OfferIdAllocator::seeded_from(&data.events);
        Self {
            purchase_order: data.purchase_order,
            events: data.events.into(),
            offer_ids,
        }
    }

    /// Load the initial dataset. An empty dataset is a valid, empty store.
    pub fn load(source: &impl TimelineSource) -> Result<Self, LoadError> {
        let store = Self::new(source.load_timeline()?);

        let orphans = orphaned_offers(&store.events);
        if !orphans.is_empty() {
            let ids: Vec<&str> = orphans.iter().map(|o| o.event_id.as_str()).collect();
            tracing::warn!(?ids, "offers reference missing parent events and will not be shown");
        }

        Ok(store)
    }

    pub fn purchase_order(&self) -> Option<&PurchaseOrder> {
        self.purchase_order.as_ref()
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Shared handle to the current collection.
    pub fn snapshot(&self) -> Arc<[TimelineEvent]> {
        Arc::clone(&self.events)
    }

    pub fn offer(&self, offer_id: impl AsRef<str>) -> Option<&OfferEvent> {
        let offer_id = offer_id.as_ref();
        self.events
            .iter()
            .filter_map(TimelineEvent::as_offer)
            .find(|o| o.id() == offer_id)
    }

    pub fn offer_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_offer()).count()
    }

    /// Project the current collection for display.
    pub fn project(&self) -> Vec<DisplayEvent> {
        project(&self.events)
    }

    pub fn view(&self) -> TimelineView {
        TimelineView::build(self.purchase_order.as_ref(), &self.events)
    }

    /// Attach a new offer to `parent_event_id`.
    ///
    /// The parent is not checked: an offer with an unknown parent is kept but
    /// never displayed. Rejects an out-of-range advance rate without touching
    /// the store.
    pub fn add_offer(
        &mut self,
        parent_event_id: impl Into<EventId>,
        fields: OfferFields,
    ) -> DomainResult<OfferEvent> {
        let mut ids = self.offer_ids;
        let event_id = ids.next_id(&self.events)?;
        let offer = OfferEvent::from_fields(event_id, parent_event_id.into(), &fields)?;
        self.offer_ids = ids;

        let mut events = Vec::with_capacity(self.events.len() + 1);
        events.extend(self.events.iter().cloned());
        events.push(TimelineEvent::Offer(offer.clone()));
        self.replace_events(events);

        tracing::info!(
            offer_id = %offer.event_id,
            parent_event_id = %offer.parent_event_id,
            advance_rate = offer.advance_rate.value(),
            "offer added"
        );
        Ok(offer)
    }

    /// Merge `patch` into the offer with `offer_id`.
    ///
    /// An unknown id (or the id of a non-offer event) is a no-op. An invalid
    /// patch is rejected and leaves the store unchanged.
    pub fn edit_offer(&mut self, offer_id: impl AsRef<str>, patch: &OfferPatch) -> DomainResult<()> {
        let offer_id = offer_id.as_ref();
        let Some(index) = self.offer_index(offer_id) else {
            tracing::debug!(offer_id, "edit of unknown offer ignored");
            return Ok(());
        };

        let updated = match &self.events[index] {
            TimelineEvent::Offer(offer) => offer.patched(patch)?,
            TimelineEvent::Financial(_) | TimelineEvent::Operational(_) => return Ok(()),
        };

        let events: Vec<TimelineEvent> = self
            .events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                if i == index {
                    TimelineEvent::Offer(updated.clone())
                } else {
                    event.clone()
                }
            })
            .collect();
        self.replace_events(events);

        tracing::info!(offer_id, "offer updated");
        Ok(())
    }

    /// Remove the offer with `offer_id`; no-op if there is none.
    pub fn delete_offer(&mut self, offer_id: impl AsRef<str>) {
        let offer_id = offer_id.as_ref();
        let Some(index) = self.offer_index(offer_id) else {
            tracing::debug!(offer_id, "delete of unknown offer ignored");
            return;
        };

        let events: Vec<TimelineEvent> = self
            .events
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, event)| event.clone())
            .collect();
        self.replace_events(events);

        tracing::info!(offer_id, "offer deleted");
    }

    /// Run an offer command forwarded by the presentation layer.
    ///
    /// Returns the new offer for `AddOffer`, `None` otherwise. A blank or
    /// padded target id is rejected with `InvalidId` before anything runs.
    pub fn execute(&mut self, command: &OfferCommand) -> DomainResult<Option<OfferEvent>> {
        command.validate_target()?;
        match command {
            OfferCommand::AddOffer {
                parent_event_id,
                fields,
            } => self
                .add_offer(parent_event_id.clone(), fields.clone())
                .map(Some),
            OfferCommand::EditOffer { offer_id, patch } => {
                self.edit_offer(offer_id, patch).map(|()| None)
            }
            OfferCommand::DeleteOffer { offer_id } => {
                self.delete_offer(offer_id);
                Ok(None)
            }
        }
    }

    fn offer_index(&self, offer_id: &str) -> Option<usize> {
        self.events
            .iter()
            .position(|e| e.is_offer() && e.id() == offer_id)
    }

    fn replace_events(&mut self, events: Vec<TimelineEvent>) {
        self.events = events.into();
    }
}
