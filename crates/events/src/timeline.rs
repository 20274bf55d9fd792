use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use tradeline_core::{DomainResult, Entity, EventDate, EventId};

use crate::event::Event;
use crate::offer::{AdvanceRate, OfferFields, OfferPatch};

pub const FINANCIAL_EVENT: &str = "Financial Event";
pub const OPERATIONAL_EVENT: &str = "Operational Event";
pub const OFFER_EVENT: &str = "Offer";

/// Payment terms attached to a financial event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialDetails {
    /// Payment terms in days. Fixtures carry either a string or a number.
    #[serde(deserialize_with = "text_or_number")]
    pub payment_terms: String,
    #[serde(default)]
    pub expiry_date: EventDate,
}

/// Event: a receivable/payable on the trade (invoice issued, payment due, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEvent {
    pub event_id: EventId,
    #[serde(default)]
    pub event_date: EventDate,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub details: FinancialDetails,
}

/// Event: a logistics milestone (shipped, customs cleared, delivered, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalEvent {
    pub event_id: EventId,
    #[serde(default)]
    pub event_date: EventDate,
    pub status: String,
    pub details: String,
}

/// Event: a financing offer against a financial or operational event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferEvent {
    pub event_id: EventId,
    pub parent_event_id: EventId,
    #[serde(default)]
    pub event_date: EventDate,
    pub advance_rate: AdvanceRate,
    #[serde(default)]
    pub expiry_date: EventDate,
}

impl OfferEvent {
    /// Build a new offer from operator-supplied fields.
    pub fn from_fields(
        event_id: EventId,
        parent_event_id: EventId,
        fields: &OfferFields,
    ) -> DomainResult<Self> {
        Ok(Self {
            event_id,
            parent_event_id,
            event_date: EventDate::from(fields.event_date),
            advance_rate: fields.validated_rate()?,
            expiry_date: EventDate::from(fields.expiry_date),
        })
    }

    /// Copy of this offer with the patch merged over it.
    ///
    /// Identity (`event_id`, `parent_event_id`) is always preserved.
    pub fn patched(&self, patch: &OfferPatch) -> DomainResult<Self> {
        let advance_rate = patch.validated_rate()?.unwrap_or(self.advance_rate);
        let merge_date = |new: Option<NaiveDate>, old: &EventDate| {
            new.map(EventDate::from).unwrap_or_else(|| old.clone())
        };

        Ok(Self {
            event_id: self.event_id.clone(),
            parent_event_id: self.parent_event_id.clone(),
            event_date: merge_date(patch.event_date, &self.event_date),
            advance_rate,
            expiry_date: merge_date(patch.expiry_date, &self.expiry_date),
        })
    }
}

/// Any event on a trade timeline, discriminated by `event_type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum TimelineEvent {
    #[serde(rename = "Financial Event")]
    Financial(FinancialEvent),
    #[serde(rename = "Operational Event")]
    Operational(OperationalEvent),
    #[serde(rename = "Offer")]
    Offer(OfferEvent),
}

impl TimelineEvent {
    pub fn as_offer(&self) -> Option<&OfferEvent> {
        match self {
            TimelineEvent::Offer(offer) => Some(offer),
            TimelineEvent::Financial(_) | TimelineEvent::Operational(_) => None,
        }
    }

    pub fn is_offer(&self) -> bool {
        self.as_offer().is_some()
    }
}

impl From<OfferEvent> for TimelineEvent {
    fn from(value: OfferEvent) -> Self {
        TimelineEvent::Offer(value)
    }
}

impl From<FinancialEvent> for TimelineEvent {
    fn from(value: FinancialEvent) -> Self {
        TimelineEvent::Financial(value)
    }
}

impl From<OperationalEvent> for TimelineEvent {
    fn from(value: OperationalEvent) -> Self {
        TimelineEvent::Operational(value)
    }
}

/// A non-offer event: something offers can be attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum AnchorEvent {
    #[serde(rename = "Financial Event")]
    Financial(FinancialEvent),
    #[serde(rename = "Operational Event")]
    Operational(OperationalEvent),
}

impl AnchorEvent {
    pub fn as_financial(&self) -> Option<&FinancialEvent> {
        match self {
            AnchorEvent::Financial(e) => Some(e),
            AnchorEvent::Operational(_) => None,
        }
    }
}

impl Event for FinancialEvent {
    fn event_type(&self) -> &'static str {
        FINANCIAL_EVENT
    }

    fn event_id(&self) -> &EventId {
        &self.event_id
    }

    fn event_date(&self) -> &EventDate {
        &self.event_date
    }
}

impl Event for OperationalEvent {
    fn event_type(&self) -> &'static str {
        OPERATIONAL_EVENT
    }

    fn event_id(&self) -> &EventId {
        &self.event_id
    }

    fn event_date(&self) -> &EventDate {
        &self.event_date
    }
}

impl Event for OfferEvent {
    fn event_type(&self) -> &'static str {
        OFFER_EVENT
    }

    fn event_id(&self) -> &EventId {
        &self.event_id
    }

    fn event_date(&self) -> &EventDate {
        &self.event_date
    }
}

impl Event for TimelineEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TimelineEvent::Financial(e) => e.event_type(),
            TimelineEvent::Operational(e) => e.event_type(),
            TimelineEvent::Offer(e) => e.event_type(),
        }
    }

    fn event_id(&self) -> &EventId {
        match self {
            TimelineEvent::Financial(e) => &e.event_id,
            TimelineEvent::Operational(e) => &e.event_id,
            TimelineEvent::Offer(e) => &e.event_id,
        }
    }

    fn event_date(&self) -> &EventDate {
        match self {
            TimelineEvent::Financial(e) => &e.event_date,
            TimelineEvent::Operational(e) => &e.event_date,
            TimelineEvent::Offer(e) => &e.event_date,
        }
    }
}

impl Event for AnchorEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AnchorEvent::Financial(e) => e.event_type(),
            AnchorEvent::Operational(e) => e.event_type(),
        }
    }

    fn event_id(&self) -> &EventId {
        match self {
            AnchorEvent::Financial(e) => &e.event_id,
            AnchorEvent::Operational(e) => &e.event_id,
        }
    }

    fn event_date(&self) -> &EventDate {
        match self {
            AnchorEvent::Financial(e) => &e.event_date,
            AnchorEvent::Operational(e) => &e.event_date,
        }
    }
}

impl Entity for TimelineEvent {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        self.event_id()
    }
}

impl Entity for OfferEvent {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.event_id
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
