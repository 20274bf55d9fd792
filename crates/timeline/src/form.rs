//! Offer form model: what the add/edit dialog holds before it is submitted.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use tradeline_core::{DomainError, DomainResult, EventId};
use tradeline_events::{AdvanceRate, OfferCommand, OfferEvent, OfferFields, OfferPatch};

use crate::store::TimelineStore;

const DEFAULT_ADVANCE_PERCENT: f64 = 80.0;
const DEFAULT_VALIDITY_DAYS: i64 = 14;

/// Raw form values, as typed into the dialog.
///
/// The advance rate is a percentage (`1..=100`); dates are `YYYY-MM-DD`
/// strings straight from the date inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDraft {
    pub advance_percent: f64,
    pub event_date: String,
    pub expiry_date: String,
}

impl OfferDraft {
    /// Fresh form: 80% advance, offered today, expiring in two weeks.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            advance_percent: DEFAULT_ADVANCE_PERCENT,
            event_date: format_date(today),
            expiry_date: format_date(today + Duration::days(DEFAULT_VALIDITY_DAYS)),
        }
    }

    /// Form pre-filled from an existing offer.
    pub fn from_offer(offer: &OfferEvent) -> Self {
        Self {
            advance_percent: offer.advance_rate.as_percent(),
            event_date: offer.event_date.to_string(),
            expiry_date: offer.expiry_date.to_string(),
        }
    }

    pub fn to_fields(&self) -> DomainResult<OfferFields> {
        let rate = AdvanceRate::from_percent(self.advance_percent)?;
        Ok(OfferFields {
            advance_rate: rate.value(),
            event_date: parse_form_date("event_date", &self.event_date)?,
            expiry_date: parse_form_date("expiry_date", &self.expiry_date)?,
        })
    }

    /// Every form field as a patch (the dialog always submits all of them).
    pub fn to_patch(&self) -> DomainResult<OfferPatch> {
        let fields = self.to_fields()?;
        Ok(OfferPatch {
            advance_rate: Some(fields.advance_rate),
            event_date: Some(fields.event_date),
            expiry_date: Some(fields.expiry_date),
        })
    }
}

/// Whether the dialog is creating an offer or editing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OfferFormMode {
    Add { parent_event_id: EventId },
    Edit { offer_id: EventId },
}

/// The offer dialog: a mode plus its draft values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferForm {
    pub mode: OfferFormMode,
    pub draft: OfferDraft,
}

impl OfferForm {
    pub fn add(parent_event_id: impl Into<EventId>, today: NaiveDate) -> Self {
        Self {
            mode: OfferFormMode::Add {
                parent_event_id: parent_event_id.into(),
            },
            draft: OfferDraft::new(today),
        }
    }

    pub fn edit(offer: &OfferEvent) -> Self {
        Self {
            mode: OfferFormMode::Edit {
                offer_id: offer.event_id.clone(),
            },
            draft: OfferDraft::from_offer(offer),
        }
    }

    pub fn to_command(&self) -> DomainResult<OfferCommand> {
        Ok(match &self.mode {
            OfferFormMode::Add { parent_event_id } => OfferCommand::AddOffer {
                parent_event_id: parent_event_id.clone(),
                fields: self.draft.to_fields()?,
            },
            OfferFormMode::Edit { offer_id } => OfferCommand::EditOffer {
                offer_id: offer_id.clone(),
                patch: self.draft.to_patch()?,
            },
        })
    }

    /// Validate and apply to `store`. Returns the new offer when adding.
    pub fn submit(&self, store: &mut TimelineStore) -> DomainResult<Option<OfferEvent>> {
        store.execute(&self.to_command()?)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_form_date(field: &str, value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        DomainError::invalid_input(format!("{field}: expected YYYY-MM-DD, got {value:?} ({e})"))
    })
}
