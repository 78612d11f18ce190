use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use panelcache::api::{MockApi, Seed};
use panelcache::config::Config;
use panelcache::container::Container;
use panelcache::logging;
use panelcache::model::{ConferenceMap, Entity, MapMarker};
use panelcache::store::{actions, AppState, Store};

#[derive(Debug, Parser)]
#[command(
    name = "panelcache",
    version,
    about = "Inspect conference admin data through the client cache"
)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List events ordered by start time.
    Events,
    /// List maps ordered by name.
    Maps,
    /// List markers ordered by name.
    Markers {
        /// Only show markers on this map.
        #[arg(long, value_name = "ID")]
        map: Option<String>,
    },
    /// Check every entity and report validation problems.
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    logging::init_tracing(&config.logging.filter);

    let seed = match &config.api.seed_path {
        Some(path) => Seed::load(path).context("failed to load seed data")?,
        None => Seed::sample(),
    };
    let api = MockApi::new(seed).with_latency(config.api.latency());
    let store = Store::default();

    match cli.command {
        Command::Events => {
            actions::load_events(&store, &api).await;
            store.select(print_events)?;
        }
        Command::Maps => {
            actions::load_maps(&store, &api).await;
            store.select(print_maps)?;
        }
        Command::Markers { map } => {
            actions::load_markers(&store, &api).await;
            store.select(|state| print_markers(state, map.as_deref()))?;
        }
        Command::Validate => {
            actions::load_events(&store, &api).await;
            actions::load_maps(&store, &api).await;
            actions::load_markers(&store, &api).await;
            let problems = store.select(report_invalid)?;
            if problems > 0 {
                bail!("{problems} invalid entities");
            }
            println!("All entities are valid");
        }
    }

    Ok(())
}

fn ensure_loaded<T>(kind: &str, container: &Container<T>) -> Result<()> {
    if let Container::Errored { error } = container {
        bail!("failed to load {kind}s: {}", error.message);
    }
    Ok(())
}

fn print_events(state: &AppState) -> Result<()> {
    ensure_loaded("event", &state.all_events)?;
    for container in state.sorted_events() {
        if let Some(event) = container.data() {
            println!(
                "{}\t{}\t{}\t{}",
                event.id,
                event.start_time,
                event.name,
                event.location.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

fn print_maps(state: &AppState) -> Result<()> {
    ensure_loaded("map", state.map_cache.container())?;
    let mut maps: Vec<&ConferenceMap> = state
        .map_cache
        .items()
        .into_iter()
        .flatten()
        .map(|(_, map)| map)
        .collect();
    maps.sort_by(|a, b| ConferenceMap::compare_by_name(a, b));
    for map in maps {
        println!("{}\t{}\t{}", map.id, map.name, map.path);
    }
    Ok(())
}

fn print_markers(state: &AppState, map_id: Option<&str>) -> Result<()> {
    ensure_loaded("marker", state.marker_cache.container())?;
    let cache = match map_id {
        Some(map_id) => state.markers_on_map(map_id),
        None => state.marker_cache.clone(),
    };

    let mut markers: Vec<&MapMarker> = cache
        .entries()
        .into_iter()
        .flatten()
        .filter_map(|(_, entry)| entry.data())
        .collect();
    markers.sort_by(|a, b| MapMarker::compare_by_name(a, b));
    for marker in markers {
        println!(
            "{}\t{}\t{}\t({}, {})",
            marker.id, marker.map_id, marker.name, marker.pos.x, marker.pos.y
        );
    }
    Ok(())
}

fn report_invalid(state: &AppState) -> Result<usize> {
    ensure_loaded("event", &state.all_events)?;
    ensure_loaded("map", state.map_cache.container())?;
    ensure_loaded("marker", state.marker_cache.container())?;

    let events = state.events.values().filter_map(Container::data).map(report);
    let maps = state
        .map_cache
        .items()
        .into_iter()
        .flatten()
        .map(|(_, map)| report(map));
    let markers = state
        .marker_cache
        .entries()
        .into_iter()
        .flatten()
        .filter_map(|(_, entry)| entry.data())
        .map(report);

    Ok(events.chain(maps).chain(markers).filter(|invalid| *invalid).count())
}

fn report<T: Entity>(entity: &T) -> bool {
    match entity.validation_message() {
        Some(message) => {
            println!("{} {}: {}", T::KIND, entity.id(), message);
            true
        }
        None => false,
    }
}
