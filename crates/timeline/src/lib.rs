//! `tradeline-timeline` — projection and in-memory state of a trade timeline.
//!
//! The [`TimelineStore`] owns the flat event collection of one purchase order
//! and accepts offer edits; [`project`] derives the nested, date-ordered view
//! from it on every read.

pub mod form;
pub mod offer_id;
pub mod projector;
pub mod source;
pub mod store;
pub mod view;

pub use form::{OfferDraft, OfferForm, OfferFormMode};
pub use offer_id::{OFFER_ID_PREFIX, OfferIdAllocator, format_offer_id, offer_sequence};
pub use projector::{DisplayEvent, orphaned_offers, project};
pub use source::{
    JsonFileSource, JsonStrSource, LoadError, StaticSource, TimelineData, TimelineSource,
    parse_timeline_json,
};
pub use store::TimelineStore;
pub use view::{
    OrderState, PricedOffer, TimelineState, TimelineView, event_type_slug, priced_offers,
    purchase_price, slug,
};
