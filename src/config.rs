// src/config.rs
// Everything season- or club-specific lives here. A new season is a single
// edit: bump DEFAULT_SEASON (the federation URL embeds the year).

use std::path::PathBuf;

pub const DEFAULT_SEASON: u16 = 2026;
pub const DEFAULT_DATA_FILE: &str = "data/data.json";

// Club identity. `CLUB_NAME` is the substring that marks a fixture or a
// standings row as ours; `CLUB_FULL_NAME` is only used in the summary.
pub const CLUB_NAME: &str = "Crazy Geese";
pub const CLUB_FULL_NAME: &str = "Kutro Crazy Geese";

// Selectors on the federation pages
pub const SEL_ROUND_OPTIONS: &str = "#selectRound option";
pub const SEL_TEAM_OPTIONS: &str = "#selectTeam option";
pub const SEL_DATEPICKER_BUTTONS: &str = ".date-picker button";

// The round dropdown's placeholder entry ("Filtern…") is not a round.
pub const ROUND_PLACEHOLDER: &str = "Filtern";

// Venue lines carry no markup we could anchor on; recognize them by name.
pub const VENUE_HINTS: &[&str] = &["Ballpark", "Cubsfield", "Sportplatz"];

// Localized role markers on the calendar page, matched case-insensitively.
pub const AWAY_MARKERS: &[&str] = &["gast", "visitor"];
pub const HOME_MARKERS: &[&str] = &["heim", "home"];

// Render settling. The pages build their DOM after load; body text sampled
// too early is empty or partial.
pub const SETTLE_MS: u64 = 2_000;
pub const SCHEDULE_SETTLE_MS: u64 = 3_000;

// Date-picker navigation budgets. The picker steps one day per click and
// has no direct seek, so we over-shoot back to before the season start and
// then walk forward. 30 steps back is generous for an Austrian league
// season; 60 forward pages bounds the scan if markers never show up.
pub const SEEK_BACK_STEPS: usize = 30;
pub const DEFAULT_MAX_DAY_PAGES: usize = 60;
pub const STEP_PAUSE_MS: u64 = 200;
pub const SEEK_SETTLE_MS: u64 = 1_000;
pub const PAGE_PAUSE_MS: u64 = 400;

// Chars of page text inspected after a game marker when matching the club
// and the throw time on a schedule page.
pub const LOOKAHEAD_CHARS: usize = 600;

/// Explicit run configuration, passed into every component.
#[derive(Clone, Debug)]
pub struct ClubConfig {
    pub club_name: String,
    pub club_full_name: String,
    pub season: u16,
    pub data_file: PathBuf,
    pub max_day_pages: usize,
}

impl ClubConfig {
    pub fn for_season(season: u16) -> Self {
        Self {
            club_name: s!(CLUB_NAME),
            club_full_name: s!(CLUB_FULL_NAME),
            season,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            max_day_pages: DEFAULT_MAX_DAY_PAGES,
        }
    }

    pub fn base_url(&self) -> String {
        format!(
            "https://www.baseballsoftball.at/de/events/baseball-landesliga-ost-{}",
            self.season
        )
    }

    pub fn standings_url(&self) -> String {
        format!("{}/standings", self.base_url())
    }

    pub fn calendar_url(&self) -> String {
        format!("{}/calendars", self.base_url())
    }

    /// Calendar filtered down to one round and one team.
    pub fn round_url(&self, round_id: &str, team_id: &str) -> String {
        format!("{}?round={}&team={}", self.calendar_url(), round_id, team_id)
    }

    pub fn schedule_url(&self) -> String {
        format!("{}/schedule-and-results", self.base_url())
    }
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self::for_season(DEFAULT_SEASON)
    }
}
