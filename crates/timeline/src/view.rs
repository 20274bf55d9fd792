//! Render-ready view of a timeline and the small derivations the admin page
//! shows next to the raw data.

use serde::Serialize;

use tradeline_events::{Event, FinancialEvent, OfferEvent, TimelineEvent};
use tradeline_purchasing::PurchaseOrder;

use crate::projector::{DisplayEvent, project};

/// What the timeline section of the page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    /// There are no events at all.
    NoEvents,
    /// Events exist but none survive projection (e.g. only orphaned offers).
    NothingToDisplay,
    Ready,
}

/// What the purchase order card should show. Independent of the timeline
/// section: a timeline can render without its order and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    NoPurchaseOrder,
    Ready,
}

/// Purchase order header plus the projected events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineView {
    pub purchase_order: Option<PurchaseOrder>,
    pub order_state: OrderState,
    pub state: TimelineState,
    pub events: Vec<DisplayEvent>,
}

impl TimelineView {
    pub fn build(purchase_order: Option<&PurchaseOrder>, events: &[TimelineEvent]) -> Self {
        let projected = project(events);
        let state = if events.is_empty() {
            TimelineState::NoEvents
        } else if projected.is_empty() {
            TimelineState::NothingToDisplay
        } else {
            TimelineState::Ready
        };

        let order_state = match purchase_order {
            Some(_) => OrderState::Ready,
            None => OrderState::NoPurchaseOrder,
        };

        Self {
            purchase_order: purchase_order.cloned(),
            order_state,
            state,
            events: projected,
        }
    }

    pub fn has_purchase_order(&self) -> bool {
        self.purchase_order.is_some()
    }
}

/// An offer under a financial event, with the price it implies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedOffer<'a> {
    pub offer: &'a OfferEvent,
    pub purchase_price: f64,
    pub currency: &'a str,
}

/// Amount a financier pays for the receivable: advance rate × event amount.
pub fn purchase_price(offer: &OfferEvent, financial: &FinancialEvent) -> f64 {
    offer.advance_rate.value() * financial.amount
}

/// Offers of a financial display event with their purchase prices.
///
/// Operational events have no amount, so this is empty for them even when
/// offers are attached.
pub fn priced_offers(display: &DisplayEvent) -> Vec<PricedOffer<'_>> {
    let Some(financial) = display.event.as_financial() else {
        return Vec::new();
    };

    display
        .offers
        .iter()
        .map(|offer| PricedOffer {
            offer,
            purchase_price: purchase_price(offer, financial),
            currency: &financial.currency,
        })
        .collect()
}

/// Lower-case, whitespace runs collapsed to `-` (`"In Transit"` → `in-transit`).
pub fn slug(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug of an event's type (`financial-event`, `operational-event`, `offer`).
pub fn event_type_slug(event: &impl Event) -> String {
    slug(event.event_type())
}
