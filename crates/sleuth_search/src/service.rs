//! # Search Service
//!
//! Runs one search end to end: guard, record, resolve, notify.
//!
//! ```text
//! search(area, now)
//!   1. area.can_search(now)      -> rejection message, nothing recorded
//!   2. publish Started
//!   3. area.record_attempt(now)  -> per-instance count + cooldown stamp
//!   4. resolver.resolve(...)     -> ledger bump, roll, pick
//!   5. publish Succeeded / Failed
//! ```
//!
//! The service owns the process-wide [`SearchLedger`], so every area
//! searched through the same service shares one attempt history.

use rand_chacha::ChaCha8Rng;

use crate::area::SearchArea;
use crate::config::SearchConfig;
use crate::draw::{RngDraw, SearchDraw};
use crate::events::{EventBus, EventReceiver, SearchEvent};
use crate::ledger::SearchLedger;
use crate::resolver::{SearchOutcome, SearchResolver};

/// Default random source for a service.
pub type DefaultDraw = RngDraw<ChaCha8Rng>;

/// Resolver, ledger and random source bundled behind one call.
#[derive(Debug)]
pub struct SearchService<D = DefaultDraw> {
    resolver: SearchResolver,
    ledger: SearchLedger,
    draw: D,
    events: EventBus<SearchEvent>,
}

impl SearchService<DefaultDraw> {
    /// Builds a service seeded from the config.
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::with_draw(
            SearchResolver::from_config(config),
            RngDraw::seeded(config.seed),
        )
    }
}

impl<D: SearchDraw> SearchService<D> {
    /// Builds a service around an explicit random source.
    #[must_use]
    pub fn with_draw(resolver: SearchResolver, draw: D) -> Self {
        Self {
            resolver,
            ledger: SearchLedger::new(),
            draw,
            events: EventBus::new(),
        }
    }

    /// Subscribes to search notifications.
    pub fn subscribe(&mut self) -> EventReceiver<SearchEvent> {
        self.events.subscribe()
    }

    /// The resolver in use.
    #[must_use]
    pub const fn resolver(&self) -> &SearchResolver {
        &self.resolver
    }

    /// Attempt history.
    #[must_use]
    pub const fn ledger(&self) -> &SearchLedger {
        &self.ledger
    }

    /// Forgets every recorded attempt.
    pub fn reset_ledger(&mut self) {
        self.ledger.reset();
    }

    /// Chance the next attempt on `area` would have, in percent.
    #[must_use]
    pub fn next_chance(&self, area: &SearchArea) -> f64 {
        self.resolver
            .final_chance(area.base_chance_percent(), self.ledger.count(area.id()))
    }

    /// Publishes a notification to every subscriber.
    pub fn notify(&mut self, event: &SearchEvent) {
        self.events.publish(event);
    }

    /// Searches `area` at clock time `now`.
    ///
    /// A guard rejection leaves the area, the ledger and the random source
    /// untouched.
    pub fn search(&mut self, area: &mut SearchArea, now: f64) -> SearchOutcome {
        if let Err(rejection) = area.can_search(now) {
            tracing::debug!(area = area.id(), %rejection, "search rejected");
            let message = rejection.to_string();
            return SearchOutcome::failed(rejection.into(), message);
        }

        self.events.publish(&SearchEvent::Started { area: area.id() });
        area.record_attempt(now);

        let outcome = self.resolver.resolve(area, &mut self.ledger, &mut self.draw);
        let event = match &outcome.item {
            Some(item) => SearchEvent::Succeeded {
                area: area.id(),
                item: item.clone(),
            },
            None => SearchEvent::Failed { area: area.id() },
        };
        self.events.publish(&event);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemCatalogEntry, ItemType, Rarity};
    use crate::draw::ScriptedDraw;
    use crate::error::{GuardRejection, SearchFailure};
    use crate::limit::Limit;
    use std::sync::Arc;

    fn scripted(rolls: impl IntoIterator<Item = f64>) -> SearchService<ScriptedDraw> {
        SearchService::with_draw(
            SearchResolver::default(),
            ScriptedDraw::new().with_rolls(rolls),
        )
    }

    fn cabinet() -> SearchArea {
        let key = Arc::new(ItemCatalogEntry::new(1, "Office Key", ItemType::Key, Rarity::Common));
        let mut area = SearchArea::new(7, "file_cabinet", 50.0)
            .with_candidates(vec![key])
            .with_max_searches(Limit::AtMost(2));
        area.set_player_in_range(true);
        area
    }

    #[test]
    fn test_successful_search_notifies_and_records() {
        let mut service = scripted([10.0]);
        let events = service.subscribe();
        let mut area = cabinet();

        let outcome = service.search(&mut area, 0.0);
        assert!(outcome.success());
        assert_eq!(outcome.message, "You found: Office Key!");
        assert_eq!(area.search_count(), 1);
        assert_eq!(service.ledger().count(7), 1);

        let drained = events.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], SearchEvent::Started { area: 7 });
        assert!(matches!(drained[1], SearchEvent::Succeeded { area: 7, .. }));
    }

    #[test]
    fn test_rejection_touches_nothing() {
        let mut service = scripted([10.0]);
        let events = service.subscribe();
        let mut area = cabinet();
        area.set_player_in_range(false);

        let outcome = service.search(&mut area, 0.0);
        assert_eq!(
            outcome.failure,
            Some(SearchFailure::GuardRejected(GuardRejection::OutOfRange))
        );
        assert_eq!(outcome.message, "You need to get closer");
        assert_eq!(area.search_count(), 0);
        assert_eq!(service.ledger().total(), 0);
        assert!(!events.has_events());
    }

    #[test]
    fn test_limit_reached_after_two_searches() {
        let mut service = scripted([99.0, 99.0, 0.0]);
        let mut area = cabinet();

        assert!(!service.search(&mut area, 0.0).success());
        assert!(!service.search(&mut area, 1.0).success());
        let third = service.search(&mut area, 2.0);
        assert_eq!(
            third.failure,
            Some(SearchFailure::GuardRejected(GuardRejection::Exhausted))
        );
        assert_eq!(service.ledger().count(7), 2);
    }

    #[test]
    fn test_next_chance_tracks_ledger() {
        let mut service = scripted([99.0]);
        let mut area = cabinet();
        assert!((service.next_chance(&area) - 50.0).abs() < 1e-9);
        let _ = service.search(&mut area, 0.0);
        assert!((service.next_chance(&area) - 42.5).abs() < 1e-9);

        service.reset_ledger();
        assert!((service.next_chance(&area) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_services_agree() {
        let config = SearchConfig::default();
        let mut first = SearchService::from_config(&config);
        let mut second = SearchService::from_config(&config);

        for now in 0..20 {
            let mut a = cabinet().with_max_searches(Limit::Unlimited);
            let mut b = a.clone();
            let now = f64::from(now);
            assert_eq!(first.search(&mut a, now), second.search(&mut b, now));
        }
    }
}
