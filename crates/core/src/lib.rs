//! `tradeline-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the timeline crates
//! (no IO, no logging setup).

pub mod date;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use date::EventDate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::EventId;
pub use value_object::ValueObject;
