//! Trade timeline events.
//!
//! The timeline is a flat collection of heterogeneous events; offers point at
//! their parent through `parent_event_id` and are grouped under it only when
//! the timeline is projected for display.

pub mod command;
pub mod event;
pub mod offer;
pub mod timeline;

pub use command::{Command, OfferCommand};
pub use event::Event;
pub use offer::{AdvanceRate, OfferFields, OfferPatch};
pub use timeline::{
    AnchorEvent, FINANCIAL_EVENT, FinancialDetails, FinancialEvent, OFFER_EVENT,
    OPERATIONAL_EVENT, OfferEvent, OperationalEvent, TimelineEvent,
};
