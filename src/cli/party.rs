//! Party command implementation

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::descriptor::{load_descriptor, PartyEventDescriptor};
use crate::party::{earning_rate_per_sec, find_location, PartySession, LOCATIONS, THEMES};
use crate::store::{FileStore, Store};

use super::{pick_character, report, EXIT_INVALID_ARGS, EXIT_SUCCESS};

fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Execute the party command
#[allow(clippy::too_many_arguments)]
pub fn run_party(
    store: &FileStore,
    character: Option<&str>,
    theme: Option<&str>,
    location: &str,
    guests: u32,
    events: &[PathBuf],
    seconds: f64,
    goal_met: bool,
    json: bool,
) -> ExitCode {
    let Some(location) = find_location(location) else {
        eprintln!("Error: Unknown location '{}'", location);
        eprintln!();
        eprintln!("Available locations:");
        for l in LOCATIONS.iter() {
            eprintln!("  {:<12} {}", l.id, l.name);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    if !(seconds.is_finite() && seconds >= 0.0) {
        eprintln!("Error: --seconds must be zero or more");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let descriptors: Vec<PartyEventDescriptor> = match events.iter().map(|p| load_descriptor(p)).collect() {
        Ok(descriptors) => descriptors,
        Err(e) => return report(e),
    };

    let roster = match store.load_roster() {
        Ok(roster) => roster,
        Err(e) => return report(e),
    };
    let host = match pick_character(&roster, character) {
        Ok(c) => c,
        Err(e) => return report(e),
    };

    let mut session =
        PartySession::start(theme.unwrap_or(THEMES[0]), location.id, host.id.clone(), guests, now_millis());
    for descriptor in &descriptors {
        session.apply_event(descriptor);
    }
    let rate = earning_rate_per_sec(roster.len(), goal_met);
    session.accrue(seconds, rate);

    if json {
        return match serde_json::to_string_pretty(&session) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => report(e),
        };
    }

    println!("{} at {} {} hosted by {}", session.theme, location.icon, location.name, host.name);
    println!("  guests: {}", session.guests);
    for event in &session.events {
        println!("  [{:+}] {}", event.impact, event.text);
    }
    println!("  vibe: {:.0}/100", session.vibe);
    println!("  earned: ${:.2} over {:.0}s (x{:.2})", session.earned, seconds, roster.earning_multiplier(goal_met));
    ExitCode::from(EXIT_SUCCESS)
}
