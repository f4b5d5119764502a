//! Party sessions and payout arithmetic
//!
//! A party is hosted by one character. Its vibe starts at 80 and is moved by
//! generated events; earnings accrue at a fixed rate per second scaled by the
//! roster size and the community goal.

use serde::Serialize;

use crate::descriptor::PartyEventDescriptor;

/// Dollars earned per second before multipliers ($5 per 10 minutes).
pub const BASE_RATE_PER_SEC: f64 = 5.0 / 600.0;
/// Bonus per character in the roster.
pub const PER_CHARACTER_BONUS: f64 = 0.1;
/// Multiplier applied when the community pool goal is met.
pub const GOAL_BONUS: f64 = 1.15;
pub const STARTING_VIBE: f64 = 80.0;
pub const VIBE_RANGE: (f64, f64) = (0.0, 100.0);

pub const THEMES: [&str; 8] = [
    "Secret Lab Experiment",
    "Nuclear Disco",
    "Interdimensional Mixer",
    "Recursive Reality Party",
    "Deep Sea Rave",
    "Magma Mosh",
    "Orbiting Afterparty",
    "Cybernetic Shindig",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const LOCATIONS: [Location; 20] = [
    Location { id: "living_room", name: "The Suburbs", icon: "🏡" },
    Location { id: "penthouse", name: "High Rise", icon: "🏢" },
    Location { id: "outer_space", name: "Orbit Station", icon: "🛸" },
    Location { id: "nebula", name: "The Secret Lab", icon: "🧪" },
    Location { id: "industrial", name: "Tech Factory", icon: "⚙️" },
    Location { id: "underwater", name: "Deep Sea Dome", icon: "🧜" },
    Location { id: "volcano", name: "Magma Fortress", icon: "🌋" },
    Location { id: "arcade", name: "Retro Joypad", icon: "🕹️" },
    Location { id: "mall", name: "Mega Mall", icon: "🛍️" },
    Location { id: "mansion", name: "Spooky Manor", icon: "🏰" },
    Location { id: "jungle", name: "Wild Canopy", icon: "🌴" },
    Location { id: "clouds", name: "Sky Haven", icon: "☁️" },
    Location { id: "ice", name: "Ice Kingdom", icon: "❄️" },
    Location { id: "desert", name: "Dune Oasis", icon: "🏜️" },
    Location { id: "temple", name: "Pixel Ruins", icon: "⛩️" },
    Location { id: "stadium", name: "Hyper Arena", icon: "🏟️" },
    Location { id: "dojo", name: "Martial Dojo", icon: "🥋" },
    Location { id: "subway", name: "Subway Station", icon: "🚇" },
    Location { id: "farm", name: "The Countryside", icon: "🚜" },
    Location { id: "cyber", name: "Neon City", icon: "🌃" },
];

pub fn find_location(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.id == id)
}

/// Roster multiplier: `1 + 0.1 * roster_len`, times 1.15 when the goal is met.
pub fn earning_multiplier(roster_len: usize, goal_met: bool) -> f64 {
    let m = 1.0 + roster_len as f64 * PER_CHARACTER_BONUS;
    if goal_met {
        m * GOAL_BONUS
    } else {
        m
    }
}

/// Dollars per second for a roster of `roster_len` characters.
///
/// ```
/// use toonkit::party::earning_rate_per_sec;
///
/// let rate = earning_rate_per_sec(1, false);
/// assert!((rate - 5.0 / 600.0 * 1.1).abs() < 1e-12);
/// ```
pub fn earning_rate_per_sec(roster_len: usize, goal_met: bool) -> f64 {
    BASE_RATE_PER_SEC * earning_multiplier(roster_len, goal_met)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Bonus,
    Hazard,
    Neutral,
}

impl EventKind {
    fn from_impact(impact: f64) -> Self {
        if impact > 0.0 {
            EventKind::Bonus
        } else if impact < 0.0 {
            EventKind::Hazard
        } else {
            EventKind::Neutral
        }
    }
}

/// An event that happened during a party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyEvent {
    pub id: String,
    pub text: String,
    pub impact: f64,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySession {
    pub theme: String,
    pub location: String,
    pub character_id: String,
    pub guests: u32,
    /// Start time in milliseconds since the epoch
    pub start_time: u64,
    pub vibe: f64,
    pub earned: f64,
    pub events: Vec<PartyEvent>,
}

impl PartySession {
    pub fn start(
        theme: impl Into<String>,
        location: impl Into<String>,
        character_id: impl Into<String>,
        guests: u32,
        start_time: u64,
    ) -> Self {
        let session = PartySession {
            theme: theme.into(),
            location: location.into(),
            character_id: character_id.into(),
            guests,
            start_time,
            vibe: STARTING_VIBE,
            earned: 0.0,
            events: Vec::new(),
        };
        tracing::info!(theme = %session.theme, location = %session.location, host = %session.character_id, "party started");
        session
    }

    /// Apply a generated event; vibe stays within 0..=100.
    pub fn apply_event(&mut self, event: &PartyEventDescriptor) -> &PartyEvent {
        let impact = if event.vibe_impact.is_finite() { event.vibe_impact } else { 0.0 };
        self.vibe = (self.vibe + impact).clamp(VIBE_RANGE.0, VIBE_RANGE.1);
        self.events.push(PartyEvent {
            id: format!("evt_{}", self.events.len() + 1),
            text: event.event.clone(),
            impact,
            kind: EventKind::from_impact(impact),
        });
        tracing::debug!(impact, vibe = self.vibe, "party event applied");
        &self.events[self.events.len() - 1]
    }

    /// Add `seconds` of earnings at `rate_per_sec`. Negative time is ignored.
    pub fn accrue(&mut self, seconds: f64, rate_per_sec: f64) -> f64 {
        if seconds.is_finite() && seconds > 0.0 && rate_per_sec.is_finite() {
            self.earned += seconds * rate_per_sec;
        }
        self.earned
    }
}
