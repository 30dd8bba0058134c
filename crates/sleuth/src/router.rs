//! # Interaction Router
//!
//! Turns player-side events into searches and keeps the scene's search
//! areas, the player's inventory and the HUD in step.
//!
//! ```text
//! ProximityEntered(id) ──> nearby = id, show prompt
//! ProximityExited(id)  ──> nearby = none, hide prompt
//! PlayerMoved(speed)   ──> remember horizontal speed
//! InteractionRequested ──> moving? ──> service? ──> search ──> inventory
//!                                                       │
//!                                   hide prompt, forget nearby area,
//!                                   schedule removal of one-shot areas
//! Tick                 ──> remove due areas, expire HUD message
//! ```
//!
//! Interactions never overlap: `handle` takes `&mut self` and each search
//! completes before it returns.

use std::collections::HashMap;

use sleuth_search::{
    AreaId, DefaultDraw, GuardRejection, Inventory, RarityColor, SearchArea, SearchConfig,
    SearchDraw, SearchEvent, SearchFailure, SearchMessages, SearchOutcome, SearchService,
};

use crate::error::{SessionError, SessionResult};
use crate::hud::Hud;
use crate::settings::{RouterSettings, SessionSettings};

/// Input to the router.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionEvent {
    /// The player walked into an area's interaction range.
    ProximityEntered(AreaId),
    /// The player walked out of an area's interaction range.
    ProximityExited(AreaId),
    /// The player's horizontal speed changed.
    PlayerMoved {
        /// Horizontal speed, vertical motion excluded.
        horizontal_speed: f32,
    },
    /// The interact button was pressed.
    InteractionRequested,
    /// Clock advanced.
    Tick,
}

/// What the player sees after an interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Text shown.
    pub message: String,
    /// Text colour.
    pub color: RarityColor,
    /// The search outcome behind the message.
    pub outcome: SearchOutcome,
    /// Whether the found item made it into the inventory.
    pub stored: bool,
}

impl Presentation {
    fn neutral(outcome: SearchOutcome) -> Self {
        Self {
            message: outcome.message.clone(),
            color: RarityColor::WHITE,
            outcome,
            stored: false,
        }
    }
}

/// Routes interaction events to the search service.
#[derive(Debug)]
pub struct InteractionRouter<D = DefaultDraw> {
    service: Option<SearchService<D>>,
    inventory: Inventory,
    areas: HashMap<AreaId, SearchArea>,
    pending_removals: Vec<(AreaId, f64)>,
    nearby: Option<AreaId>,
    horizontal_speed: f32,
    settings: RouterSettings,
    messages: SearchMessages,
    removal_delay_seconds: f64,
    hud: Hud,
}

impl InteractionRouter<DefaultDraw> {
    /// Builds a router with a seeded search service attached.
    #[must_use]
    pub fn from_config(config: &SearchConfig, settings: &SessionSettings) -> Self {
        let mut router = Self::new(config, settings);
        router.attach_service(SearchService::from_config(config));
        router
    }
}

impl<D: SearchDraw> InteractionRouter<D> {
    /// Builds a router with an empty inventory and no search service.
    #[must_use]
    pub fn new(config: &SearchConfig, settings: &SessionSettings) -> Self {
        Self {
            service: None,
            inventory: Inventory::from_config(&config.inventory),
            areas: HashMap::new(),
            pending_removals: Vec::new(),
            nearby: None,
            horizontal_speed: 0.0,
            settings: settings.router,
            messages: config.messages.clone(),
            removal_delay_seconds: config.removal_delay_seconds,
            hud: Hud::new(settings.hud.message_display_seconds),
        }
    }

    /// Attaches the search service, replacing any previous one.
    pub fn attach_service(&mut self, service: SearchService<D>) {
        self.service = Some(service);
    }

    /// Detaches and returns the search service.
    pub fn detach_service(&mut self) -> Option<SearchService<D>> {
        self.service.take()
    }

    /// The attached search service.
    #[must_use]
    pub const fn service(&self) -> Option<&SearchService<D>> {
        self.service.as_ref()
    }

    /// Mutable access to the attached search service.
    pub fn service_mut(&mut self) -> Option<&mut SearchService<D>> {
        self.service.as_mut()
    }

    /// The player's inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the player's inventory.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// HUD state.
    #[must_use]
    pub const fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Area the player is currently next to.
    #[must_use]
    pub const fn nearby_area(&self) -> Option<AreaId> {
        self.nearby
    }

    /// Adds areas to the scene.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Search` wrapping `DuplicateArea` if an id is
    /// already present. Areas before the duplicate stay added.
    pub fn add_areas(&mut self, areas: impl IntoIterator<Item = SearchArea>) -> SessionResult<()> {
        for area in areas {
            let id = area.id();
            if self.areas.contains_key(&id) {
                return Err(sleuth_search::SearchError::DuplicateArea(id).into());
            }
            self.areas.insert(id, area);
        }
        Ok(())
    }

    /// Looks up an area still in the scene.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownArea` if it was never added or has
    /// been removed.
    pub fn area(&self, id: AreaId) -> SessionResult<&SearchArea> {
        self.areas.get(&id).ok_or(SessionError::UnknownArea(id))
    }

    /// Number of areas still in the scene.
    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Areas waiting to be removed, with their due times.
    #[must_use]
    pub fn pending_removals(&self) -> &[(AreaId, f64)] {
        &self.pending_removals
    }

    /// Processes one event at clock time `now`.
    ///
    /// Returns a presentation only for interaction requests that reached
    /// an area.
    pub fn handle(&mut self, event: InteractionEvent, now: f64) -> Option<Presentation> {
        match event {
            InteractionEvent::ProximityEntered(id) => {
                self.enter(id);
                None
            }
            InteractionEvent::ProximityExited(id) => {
                self.exit(id);
                None
            }
            InteractionEvent::PlayerMoved { horizontal_speed } => {
                self.horizontal_speed = horizontal_speed.abs();
                None
            }
            InteractionEvent::InteractionRequested => self.interact(now),
            InteractionEvent::Tick => {
                self.tick(now);
                None
            }
        }
    }

    fn enter(&mut self, id: AreaId) {
        let Some(area) = self.areas.get_mut(&id) else {
            tracing::warn!(area = id, "proximity event for an area not in the scene");
            return;
        };
        area.set_player_in_range(true);

        if self.nearby != Some(id) {
            self.nearby = Some(id);
            self.hud.show_prompt(area.interaction_prompt());
            tracing::debug!(area = id, name = area.name(), "nearby area set");
        }
    }

    fn exit(&mut self, id: AreaId) {
        if let Some(area) = self.areas.get_mut(&id) {
            area.set_player_in_range(false);
        }
        if self.nearby == Some(id) {
            self.nearby = None;
            self.hud.hide_prompt();
            tracing::debug!(area = id, "nearby area cleared");
        }
    }

    fn is_moving(&self) -> bool {
        self.horizontal_speed > self.settings.movement_threshold
    }

    fn interact(&mut self, now: f64) -> Option<Presentation> {
        let Some(id) = self.nearby else {
            tracing::debug!("nothing to interact with");
            return None;
        };
        if !self.areas.contains_key(&id) {
            self.nearby = None;
            return None;
        }

        if self.settings.prevent_search_while_moving && self.is_moving() {
            let rejection = GuardRejection::Moving;
            let message = rejection.to_string();
            let outcome = SearchOutcome::failed(rejection.into(), message);
            return Some(self.present(Presentation::neutral(outcome), now));
        }

        let Some(service) = self.service.as_mut() else {
            tracing::error!(area = id, "interaction requested with no search service attached");
            let outcome = SearchOutcome::failed(
                SearchFailure::ConfigurationMissing,
                self.messages.configuration_missing.clone(),
            );
            return Some(self.present(Presentation::neutral(outcome), now));
        };
        let area = self.areas.get_mut(&id)?;

        let outcome = service.search(area, now);
        let resolved = outcome
            .failure
            .as_ref()
            .map_or(true, SearchFailure::was_resolved);
        if !resolved {
            return Some(self.present(Presentation::neutral(outcome), now));
        }

        let removes = area.removes_after_search();
        let presentation = match outcome.item.clone() {
            Some(item) => {
                if self.inventory.add(item) {
                    Presentation {
                        message: outcome.message.clone(),
                        color: outcome.color(),
                        outcome,
                        stored: true,
                    }
                } else {
                    tracing::info!(area = id, "found item did not fit in the inventory");
                    Presentation {
                        message: self.messages.inventory_full.clone(),
                        color: RarityColor::WHITE,
                        outcome,
                        stored: false,
                    }
                }
            }
            None => Presentation::neutral(outcome),
        };

        self.hud.hide_prompt();
        self.nearby = None;
        if removes {
            let due = now + self.removal_delay_seconds;
            self.pending_removals.push((id, due));
            tracing::debug!(area = id, due, "area scheduled for removal");
        }

        Some(self.present(presentation, now))
    }

    fn present(&mut self, presentation: Presentation, now: f64) -> Presentation {
        self.hud
            .show_message(presentation.message.clone(), presentation.color, now);
        presentation
    }

    fn tick(&mut self, now: f64) {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_removals)
            .into_iter()
            .partition(|&(_, at)| at <= now);
        self.pending_removals = waiting;

        for (id, _) in due {
            if self.areas.remove(&id).is_none() {
                continue;
            }
            if self.nearby == Some(id) {
                self.nearby = None;
                self.hud.hide_prompt();
            }
            if let Some(service) = self.service.as_mut() {
                service.notify(&SearchEvent::AreaRemoved { area: id });
            }
            tracing::info!(area = id, "search area removed");
        }

        self.hud.tick(now);
    }
}
