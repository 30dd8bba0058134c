//! # SLEUTH Headless Simulation
//!
//! Plays a scripted walk through a content file without any engine:
//! visit every search area, search it a few times, let removal timers run,
//! then hop into a minigame and back.
//!
//! ```bash
//! # Default data directory (./data)
//! cargo run --bin sleuth_sim
//!
//! # Custom data directory, with roll details
//! RUST_LOG=sleuth_search=debug cargo run --bin sleuth_sim -- path/to/data
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use sleuth::search::{ContentPack, SearchConfig};
use sleuth::{
    InteractionEvent, InteractionRouter, PlayerPose, PlayerStateKeeper, SessionSettings,
};

/// Attempts made on each area before moving on.
const ATTEMPTS_PER_AREA: u32 = 3;

/// Seconds the scripted player waits between attempts.
const STEP_SECONDS: f64 = 2.0;

fn main() -> Result<()> {
    setup_logging();

    let data_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("data"), PathBuf::from);

    let config = SearchConfig::load(data_dir.join("config/search.toml"))
        .context("loading search config")?;
    let settings = SessionSettings::load(data_dir.join("config/session.toml"))
        .context("loading session settings")?;
    let content = ContentPack::load(data_dir.join("content/police_office.toml"))
        .context("loading content")?;

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    SLEUTH SEARCH SIMULATION");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Items:  {}", content.catalog.len());
    println!("  Areas:  {}", content.areas.len());
    println!("  Seed:   {:#x}", config.seed);
    println!();

    let order: Vec<_> = content
        .areas
        .iter()
        .map(|area| (area.id(), area.name().to_owned()))
        .collect();

    let mut router = InteractionRouter::from_config(&config, &settings);
    router.add_areas(content.areas)?;

    let mut now = 0.0;
    for (id, name) in order {
        println!("▶ {name}");
        for _ in 0..ATTEMPTS_PER_AREA {
            router.handle(InteractionEvent::PlayerMoved { horizontal_speed: 0.0 }, now);
            router.handle(InteractionEvent::ProximityEntered(id), now);
            if let Some(shown) = router.handle(InteractionEvent::InteractionRequested, now) {
                let chance = shown
                    .outcome
                    .chance
                    .map_or_else(|| "-".to_owned(), |c| format!("{c:.1}%"));
                println!("   [{chance:>6}] {}", shown.message);
            }
            router.handle(InteractionEvent::ProximityExited(id), now);

            now += STEP_SECONDS;
            router.handle(InteractionEvent::Tick, now);
            if router.area(id).is_err() {
                println!("   (area removed)");
                break;
            }
        }
    }

    println!();
    println!("{}", router.inventory().stats());
    for item in router.inventory().quest_items() {
        println!("  quest item: {} ({})", item.display_name, item.quest_id.as_deref().unwrap_or("-"));
    }
    if let Some(service) = router.service() {
        println!(
            "  searches resolved: {} across {} areas",
            service.ledger().total(),
            service.ledger().areas_searched()
        );
    }

    let mut keeper = PlayerStateKeeper::new(settings.return_scene_name.clone());
    keeper.save(PlayerPose::new([3.5, 0.0, -7.25], PlayerPose::IDENTITY_ROTATION));
    tracing::info!("entering minigame");
    if keeper.should_restore() {
        let pose = keeper.restore()?;
        println!();
        println!("  back in {} at {:?}", keeper.return_scene(), pose.position);
    }

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
