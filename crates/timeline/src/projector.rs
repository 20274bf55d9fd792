//! Timeline projection: flat event collection → date-ordered display list.
//!
//! The projection is pure and deterministic. It is re-run on every read, so it
//! never caches and never mutates its input.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use tradeline_core::{EventDate, EventId};
use tradeline_events::{AnchorEvent, Event, OfferEvent, TimelineEvent};

/// A financial or operational event with the offers that reference it.
///
/// `offers` is empty both when nothing was ever attached and when every offer
/// has been deleted; the two states render the same.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEvent {
    #[serde(flatten)]
    pub event: AnchorEvent,
    pub offers: Vec<OfferEvent>,
}

impl DisplayEvent {
    pub fn has_offers(&self) -> bool {
        !self.offers.is_empty()
    }
}

impl Event for DisplayEvent {
    fn event_type(&self) -> &'static str {
        self.event.event_type()
    }

    fn event_id(&self) -> &EventId {
        self.event.event_id()
    }

    fn event_date(&self) -> &EventDate {
        self.event.event_date()
    }
}

/// Project a flat timeline into display order.
///
/// 1. Offers are split from financial/operational events.
/// 2. Non-offer events are sorted ascending by date. The sort is stable, so
///    events on the same day keep their input order. Unparsed dates go last,
///    also in input order.
/// 3. Each event gets every offer whose `parent_event_id` equals its id, in
///    the offers' input order (offers are not re-sorted by date).
///
/// Offers whose parent is missing are dropped: they appear neither at the top
/// level nor attached anywhere. See [`orphaned_offers`] to inspect them.
pub fn project(events: &[TimelineEvent]) -> Vec<DisplayEvent> {
    let mut anchors: Vec<AnchorEvent> = Vec::new();
    let mut offers_by_parent: HashMap<&EventId, Vec<&OfferEvent>> = HashMap::new();
    let mut offer_count = 0usize;

    for event in events {
        match event {
            TimelineEvent::Financial(e) => anchors.push(AnchorEvent::Financial(e.clone())),
            TimelineEvent::Operational(e) => anchors.push(AnchorEvent::Operational(e.clone())),
            TimelineEvent::Offer(offer) => {
                offer_count += 1;
                offers_by_parent
                    .entry(&offer.parent_event_id)
                    .or_default()
                    .push(offer);
            }
        }
    }

    anchors.sort_by_key(|e| e.event_date().sort_key());

    let mut attached = 0usize;
    let projected: Vec<DisplayEvent> = anchors
        .into_iter()
        .map(|event| {
            let offers: Vec<OfferEvent> = offers_by_parent
                .get(event.event_id())
                .map(|list| list.iter().map(|o| (*o).clone()).collect())
                .unwrap_or_default();
            attached += offers.len();
            DisplayEvent { event, offers }
        })
        .collect();

    tracing::debug!(
        events = projected.len(),
        offers = offer_count,
        orphaned = offer_count.saturating_sub(attached),
        "projected trade timeline"
    );

    projected
}

/// Offers that [`project`] drops because their parent is not in `events`.
///
/// Input order is preserved.
pub fn orphaned_offers(events: &[TimelineEvent]) -> Vec<&OfferEvent> {
    let anchor_ids: HashSet<&EventId> = events
        .iter()
        .filter(|e| !e.is_offer())
        .map(|e| e.event_id())
        .collect();

    events
        .iter()
        .filter_map(TimelineEvent::as_offer)
        .filter(|offer| !anchor_ids.contains(&offer.parent_event_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tradeline_events::{
        AdvanceRate, FinancialDetails, FinancialEvent, OperationalEvent,
    };

    fn financial(id: &str, date: &str) -> TimelineEvent {
        TimelineEvent::Financial(FinancialEvent {
            event_id: EventId::new(id),
            event_date: EventDate::parse(date),
            description: format!("invoice {id}"),
            amount: 50_000.0,
            currency: "USD".to_string(),
            details: FinancialDetails {
                payment_terms: "60".to_string(),
                expiry_date: EventDate::parse("2024-06-30"),
            },
        })
    }

    fn operational(id: &str, date: &str) -> TimelineEvent {
        TimelineEvent::Operational(OperationalEvent {
            event_id: EventId::new(id),
            event_date: EventDate::parse(date),
            status: "In Transit".to_string(),
            details: "on the water".to_string(),
        })
    }

    fn offer(id: &str, parent: &str, date: &str) -> TimelineEvent {
        TimelineEvent::Offer(OfferEvent {
            event_id: EventId::new(id),
            parent_event_id: EventId::new(parent),
            event_date: EventDate::parse(date),
            advance_rate: AdvanceRate::new(0.8).unwrap(),
            expiry_date: EventDate::parse("2024-12-31"),
        })
    }

    fn ids(projected: &[DisplayEvent]) -> Vec<&str> {
        projected.iter().map(|e| e.event_id().as_str()).collect()
    }

    #[test]
    fn orders_by_date() {
        let events = vec![financial("F1", "2024-01-10"), operational("O1", "2024-01-05")];
        assert_eq!(ids(&project(&events)), vec!["O1", "F1"]);
    }

    #[test]
    fn same_day_events_keep_input_order() {
        let events = vec![
            operational("O2", "2024-01-05"),
            financial("F1", "2024-01-05"),
            operational("O1", "2024-01-05"),
        ];
        assert_eq!(ids(&project(&events)), vec!["O2", "F1", "O1"]);
    }

    #[test]
    fn unparsed_dates_sort_last_in_input_order() {
        let events = vec![
            financial("F-bad", "soon"),
            operational("O1", "2024-01-05"),
            operational("O-bad", ""),
            financial("F1", "2023-12-01"),
        ];
        assert_eq!(ids(&project(&events)), vec!["F1", "O1", "F-bad", "O-bad"]);
    }

    #[test]
    fn attaches_offers_in_input_order_without_resorting() {
        let events = vec![
            offer("OF002", "F1", "2024-02-01"),
            financial("F1", "2024-01-10"),
            offer("OF001", "F1", "2024-01-15"),
            offer("OF003", "O1", "2024-01-06"),
            operational("O1", "2024-01-05"),
        ];

        let projected = project(&events);
        assert_eq!(ids(&projected), vec!["O1", "F1"]);

        let f1_offers: Vec<&str> = projected[1]
            .offers
            .iter()
            .map(|o| o.event_id.as_str())
            .collect();
        assert_eq!(f1_offers, vec!["OF002", "OF001"]);
        assert_eq!(projected[0].offers.len(), 1);
        assert_eq!(projected[0].offers[0].event_id, "OF003");
    }

    #[test]
    fn orphaned_offers_are_dropped_from_output() {
        let events = vec![
            financial("F1", "2024-01-10"),
            offer("OF001", "F999", "2024-01-11"),
        ];

        let projected = project(&events);
        assert_eq!(ids(&projected), vec!["F1"]);
        assert!(!projected[0].has_offers());

        let orphans = orphaned_offers(&events);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].event_id, "OF001");
    }

    #[test]
    fn offers_are_never_top_level() {
        let events = vec![offer("OF001", "OF002", "2024-01-01"), offer("OF002", "OF001", "2024-01-01")];
        assert!(project(&events).is_empty());
    }

    #[test]
    fn empty_input_projects_to_empty_output() {
        assert!(project(&[]).is_empty());
        assert!(orphaned_offers(&[]).is_empty());
    }

    #[test]
    fn input_is_left_untouched() {
        let events = vec![financial("F1", "2024-01-10"), operational("O1", "2024-01-05")];
        let before = events.clone();
        let _ = project(&events);
        assert_eq!(events, before);
    }

    #[test]
    fn serializes_flat_with_offers_field() {
        let events = vec![financial("F1", "2024-01-10"), offer("OF001", "F1", "2024-01-11")];
        let value = serde_json::to_value(project(&events)).unwrap();
        assert_eq!(value[0]["event_type"], "Financial Event");
        assert_eq!(value[0]["event_id"], "F1");
        assert_eq!(value[0]["offers"][0]["event_id"], "OF001");
    }

    /// Timelines with unique ids; offers point at a random earlier or later
    /// event, or at an id that does not exist.
    fn arb_timeline() -> impl Strategy<Value = Vec<TimelineEvent>> {
        prop::collection::vec((0u8..3, 1u32..10, 0usize..40), 0..30).prop_map(|shapes| {
            let ids: Vec<String> = shapes
                .iter()
                .enumerate()
                .map(|(i, (kind, _, _))| match kind {
                    0 => format!("F{i}"),
                    1 => format!("O{i}"),
                    _ => format!("OF{i:03}"),
                })
                .collect();

            shapes
                .iter()
                .enumerate()
                .map(|(i, (kind, day, parent))| {
                    let date = format!("2024-01-0{day}");
                    match kind {
                        0 => financial(&ids[i], &date),
                        1 => operational(&ids[i], &date),
                        _ => {
                            let parent_id = ids
                                .get(*parent)
                                .cloned()
                                .unwrap_or_else(|| format!("MISSING{parent}"));
                            offer(&ids[i], &parent_id, &date)
                        }
                    }
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: output is sorted by date and equal dates keep input order.
        #[test]
        fn output_is_stably_sorted(events in arb_timeline()) {
            let projected = project(&events);

            let input_pos = |id: &EventId| {
                events.iter().position(|e| !e.is_offer() && e.event_id() == id)
            };

            for pair in projected.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.event_date().sort_key() <= b.event_date().sort_key());
                if a.event_date() == b.event_date() {
                    prop_assert!(input_pos(a.event_id()) < input_pos(b.event_id()));
                }
            }
        }

        /// Property: every non-offer event appears once, every attached offer
        /// names its display parent, and orphans appear nowhere.
        #[test]
        fn offers_land_under_their_parent_only(events in arb_timeline()) {
            let projected = project(&events);

            let anchor_total = events.iter().filter(|e| !e.is_offer()).count();
            prop_assert_eq!(projected.len(), anchor_total);

            for display in &projected {
                let expected: Vec<&OfferEvent> = events
                    .iter()
                    .filter_map(TimelineEvent::as_offer)
                    .filter(|o| &o.parent_event_id == display.event_id())
                    .collect();
                let actual: Vec<&OfferEvent> = display.offers.iter().collect();
                prop_assert_eq!(actual, expected);
            }

            for orphan in orphaned_offers(&events) {
                for display in &projected {
                    prop_assert!(display.offers.iter().all(|o| o.event_id != orphan.event_id));
                }
            }
        }
    }
}
