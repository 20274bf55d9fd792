use serde::{Deserialize, Serialize};

use tradeline_core::{DomainResult, EventId};

use crate::offer::{OfferFields, OfferPatch};

/// A command targets a specific timeline event (command abstraction).
///
/// Commands represent **intent** coming from the presentation layer (a form
/// submission or a delete button). They are transient; the store turns an
/// accepted command into a new event collection.
pub trait Command: Clone + core::fmt::Debug {
    /// The event the command is about: the parent for an add, the offer itself
    /// for an edit or delete.
    fn target_event_id(&self) -> &EventId;

    /// Reject a target id that could never name an event (blank or padded).
    ///
    /// Commands arrive from forms and scripts, so their ids go through the same
    /// [`EventId`] parsing as any other user input.
    fn validate_target(&self) -> DomainResult<()> {
        self.target_event_id().as_str().parse::<EventId>().map(|_| ())
    }
}

/// Offer edit intents, as forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum OfferCommand {
    AddOffer {
        parent_event_id: EventId,
        #[serde(flatten)]
        fields: OfferFields,
    },
    EditOffer {
        offer_id: EventId,
        #[serde(flatten)]
        patch: OfferPatch,
    },
    DeleteOffer {
        offer_id: EventId,
    },
}

impl Command for OfferCommand {
    fn target_event_id(&self) -> &EventId {
        match self {
            OfferCommand::AddOffer {
                parent_event_id, ..
            } => parent_event_id,
            OfferCommand::EditOffer { offer_id, .. } => offer_id,
            OfferCommand::DeleteOffer { offer_id } => offer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tradeline_core::DomainError;

    #[test]
    fn decodes_command_script() {
        let json = r#"[
            {"command": "add_offer", "parent_event_id": "F1", "advance_rate": 0.8,
             "event_date": "2024-01-11", "expiry_date": "2024-01-25"},
            {"command": "edit_offer", "offer_id": "OF002", "advance_rate": 0.75},
            {"command": "delete_offer", "offer_id": "OF001"}
        ]"#;

        let commands: Vec<OfferCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(commands.len(), 3);

        assert_eq!(
            commands[0],
            OfferCommand::AddOffer {
                parent_event_id: EventId::new("F1"),
                fields: OfferFields {
                    advance_rate: 0.8,
                    event_date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
                    expiry_date: NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
                },
            }
        );
        assert_eq!(commands[1].target_event_id(), "OF002");
        match &commands[1] {
            OfferCommand::EditOffer { patch, .. } => {
                assert_eq!(patch.advance_rate, Some(0.75));
                assert!(patch.event_date.is_none());
            }
            other => panic!("Expected edit command, got {other:?}"),
        }
        assert_eq!(commands[2].target_event_id(), "OF001");
    }

    #[test]
    fn blank_or_padded_targets_fail_validation() {
        let blank = OfferCommand::DeleteOffer {
            offer_id: EventId::new(""),
        };
        let padded = OfferCommand::EditOffer {
            offer_id: EventId::new("OF001 "),
            patch: OfferPatch::default(),
        };
        let ok = OfferCommand::DeleteOffer {
            offer_id: EventId::new("OF001"),
        };

        assert!(matches!(blank.validate_target(), Err(DomainError::InvalidId(_))));
        assert!(matches!(padded.validate_target(), Err(DomainError::InvalidId(_))));
        assert_eq!(ok.validate_target(), Ok(()));
    }
}
