//! Purchasing domain module (the purchase order a trade timeline belongs to).
//!
//! Purchase orders are loaded once with the timeline and never mutated by the
//! timeline core.

pub mod order;

pub use order::{OrderDetails, PurchaseOrder, PurchaseOrderId};
