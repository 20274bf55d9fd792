use serde::{Deserialize, Serialize};

use tradeline_core::ValueObject;

/// Which side of the trade a party is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Buyer,
    Seller,
}

impl PartyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyRole::Buyer => "Buyer",
            PartyRole::Seller => "Seller",
        }
    }
}

/// Company and contact details of a trading party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
}

impl ValueObject for Party {}

impl Party {
    pub fn new(
        company_name: impl Into<String>,
        contact_name: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            contact_name: contact_name.into(),
            contact_email: contact_email.into(),
        }
    }
}
