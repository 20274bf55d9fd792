use serde::{Deserialize, Serialize};

use tradeline_core::{EventDate, ValueObject};
use tradeline_parties::{Party, PartyRole};

/// Purchase order identifier as issued by the buyer (e.g. `PO-2024-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(String);

impl PurchaseOrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PurchaseOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What was ordered, how much of it, and when it is due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub product: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default)]
    pub delivery_date: EventDate,
}

impl ValueObject for OrderDetails {}

/// Read model: the purchase order header shown above a trade timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub order_id: PurchaseOrderId,
    #[serde(default)]
    pub order_date: EventDate,
    pub buyer: Party,
    pub seller: Party,
    pub order_details: OrderDetails,
}

impl PurchaseOrder {
    pub fn party(&self, role: PartyRole) -> &Party {
        match role {
            PartyRole::Buyer => &self.buyer,
            PartyRole::Seller => &self.seller,
        }
    }
}
