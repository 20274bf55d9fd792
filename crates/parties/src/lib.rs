//! Parties domain module (buyer and seller of a purchase order).
//!
//! Parties are read-only contact records loaded with the purchase order; this
//! crate holds no business rules beyond their shape.

pub mod party;

pub use party::{Party, PartyRole};
