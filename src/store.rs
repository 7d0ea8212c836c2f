// src/store.rs
// Persisted dataset: the club site's data.json. Read once at the start of a
// run, rewritten wholesale at the end; a crash in between leaves the old
// file untouched. Field names follow the site's German schema.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Season phase. Serialized with the labels the site displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Vorsaison")]
    PreSeason,
    #[default]
    #[serde(rename = "Regular Season")]
    RegularSeason,
    #[serde(rename = "Playoffs")]
    Playoffs,
    #[serde(rename = "Endklassement")]
    FinalStandings,
}

impl Phase {
    /// Which phase a round named like this belongs to. The federation labels
    /// rounds "Regular Season", "Playoffs", "Platzierungsrunde"; anything
    /// unrecognized counts as regular season.
    pub fn from_round_label(label: &str) -> Self {
        let lc = label.to_lowercase();
        if lc.contains("playoff") {
            Phase::Playoffs
        } else if lc.contains("platzierung") {
            Phase::FinalStandings
        } else {
            Phase::RegularSeason
        }
    }

    /// Standings phase by calendar month: October onward the table is final,
    /// April onward the season runs, before that it is pre-season.
    pub fn for_month(month: u32) -> Self {
        if month >= 10 {
            Phase::FinalStandings
        } else if month >= 4 {
            Phase::RegularSeason
        } else {
            Phase::PreSeason
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::PreSeason => "Vorsaison",
            Phase::RegularSeason => "Regular Season",
            Phase::Playoffs => "Playoffs",
            Phase::FinalStandings => "Endklassement",
        }
    }
}

/// One fixture, scheduled or completed. Empty `date`/`time`/`venue` mean
/// unknown; scores are `null` in the file until the game was played.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "datum", default)]
    pub date: String,
    #[serde(rename = "zeit", default)]
    pub time: String,
    #[serde(rename = "heim", default)]
    pub home: String,
    #[serde(rename = "gast", default)]
    pub away: String,
    #[serde(rename = "ergebnis_heim", default)]
    pub home_score: Option<u32>,
    #[serde(rename = "ergebnis_gast", default)]
    pub away_score: Option<u32>,
    #[serde(rename = "ort", default)]
    pub venue: String,
    #[serde(default)]
    pub phase: Phase,
}

impl GameRecord {
    /// A fixture belongs to the club iff the club name shows up on either side.
    pub fn involves(&self, club_name: &str) -> bool {
        self.home.contains(club_name) || self.away.contains(club_name)
    }
}

/// One row of the league table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    #[serde(rename = "rang")]
    pub rank: u32,
    pub name: String,
    #[serde(rename = "kuerzel", default)]
    pub short_code: String,
    #[serde(rename = "siege")]
    pub wins: u32,
    #[serde(rename = "niederlagen")]
    pub losses: u32,
    #[serde(rename = "unentschieden", default)]
    pub ties: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StandingsBlock {
    #[serde(default)]
    pub teams: Vec<TeamStanding>,
    /// Snapshot date, ISO.
    #[serde(rename = "stand", default)]
    pub as_of: String,
    #[serde(default)]
    pub phase: Phase,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GamesBlock {
    #[serde(rename = "vergangene", default)]
    pub past: Vec<GameRecord>,
    #[serde(rename = "naechste", default)]
    pub upcoming: Vec<GameRecord>,
    #[serde(rename = "letztes_update", default)]
    pub last_update: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "tabelle", default)]
    pub standings: StandingsBlock,
    #[serde(rename = "spiele", default)]
    pub games: GamesBlock,
}

pub fn load(path: &Path) -> Result<Dataset, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let data = serde_json::from_str(&text)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(data)
}

pub fn save(path: &Path, data: &Dataset) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut text = serde_json::to_string_pretty(data)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}
