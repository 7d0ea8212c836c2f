// src/specs/calendar.rs
//! Scraping spec for the calendar page.
//!
//! Two jobs:
//! - Discover the season's rounds and the club's internal team id from the
//!   page's filter dropdowns (their ids change every season).
//! - Parse one round's rendered text into candidate games. The page is a
//!   styled list, not a table; after rendering it reads as a line sequence
//!
//!     #12 - Spielbeschreibung
//!     Geese Ballpark
//!     GAST
//!     VBB
//!     Vienna Bucks
//!     3 : 7
//!     HEIM
//!     CG
//!     Kutro Crazy Geese
//!
//!   with decorative lines sprinkled in between, so this is a line-oriented
//!   state machine rather than a selector query.
//!
//! The calendar shows today's date instead of the fixture date (upstream
//! bug); dates come from `specs::schedule` afterwards.

use std::error::Error;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::config::{self, ClubConfig};
use crate::core::browser::Surface;
use crate::core::text::{is_short_code, non_blank_lines};
use crate::progress::Progress;
use crate::store::{GameRecord, Phase};

/// One selectable round (e.g. "Regular Season" → "4907").
#[derive(Clone, Debug)]
pub struct Round {
    pub label: String,
    pub id: String,
}

/// What the filter dropdowns yield.
pub struct Discovery {
    pub rounds: Vec<Round>,
    pub team_id: String,
}

/// One game as read off the calendar. `number` keeps the whole marker line
/// ("#12 - ..."); the schedule reconciler keys on its leading "#12". The
/// short codes only disambiguate markers from full names while parsing and
/// never reach the persisted schema.
#[derive(Clone, Debug, Default)]
pub struct CandidateGame {
    pub number: String,
    pub phase: Phase,
    pub venue: String,
    pub away: String,
    pub away_code: String,
    pub home: String,
    pub home_code: String,
    pub away_score: Option<u32>,
    pub home_score: Option<u32>,
    pub date: String,
    pub time: String,
}

impl CandidateGame {
    pub fn into_record(self) -> GameRecord {
        GameRecord {
            date: self.date,
            time: self.time,
            home: self.home,
            away: self.away,
            home_score: self.home_score,
            away_score: self.away_score,
            venue: self.venue,
            phase: self.phase,
        }
    }
}

/// Read rounds and the club's team id from the calendar dropdowns.
/// Both are required for everything downstream, so either missing is fatal.
pub fn discover(surface: &dyn Surface, cfg: &ClubConfig) -> Result<Discovery, Box<dyn Error>> {
    surface.goto(&cfg.calendar_url())?;

    let mut rounds = Vec::new();
    for opt in surface.options(config::SEL_ROUND_OPTIONS)? {
        if opt.value.is_empty() || opt.label.is_empty() {
            continue;
        }
        if opt.label.contains(config::ROUND_PLACEHOLDER) {
            continue; // the "Filtern…" placeholder entry
        }
        rounds.push(Round { label: opt.label, id: opt.value });
    }
    if rounds.is_empty() {
        return Err("no rounds found in the calendar round dropdown".into());
    }

    let team_id = surface
        .options(config::SEL_TEAM_OPTIONS)?
        .into_iter()
        .find(|o| o.label.contains(&cfg.club_name))
        .map(|o| o.value)
        .ok_or_else(|| format!("'{}' not found in the team dropdown", cfg.club_name))?;
    if team_id.is_empty() {
        return Err(format!("'{}' has an empty team id", cfg.club_name).into());
    }

    Ok(Discovery { rounds, team_id })
}

/// Scrape every round and keep the club's games.
pub fn fetch_games(
    surface: &dyn Surface,
    cfg: &ClubConfig,
    disc: &Discovery,
    progress: &mut dyn Progress,
) -> Result<Vec<CandidateGame>, Box<dyn Error>> {
    let mut all = Vec::new();
    for round in &disc.rounds {
        progress.log(&format!("loading round: {}", round.label));
        surface.goto(&cfg.round_url(&round.id, &disc.team_id))?;
        let body = surface.body_text()?;
        let mut games =
            parse_round_text(&body, Phase::from_round_label(&round.label), &cfg.club_name);
        progress.log(&format!("  -> {} club games", games.len()));
        all.append(&mut games);
    }
    Ok(all)
}

enum ParseState {
    Idle,
    AwaitingAway,
    AwaitingHome,
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s*:\s*(\d+)$").unwrap())
}

/// "#12 - Spielbeschreibung" opens a new game block.
fn is_marker(line: &str) -> bool {
    line.starts_with('#') && line.contains(" - ")
}

fn matches_any(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| line.eq_ignore_ascii_case(m))
}

/// Parse one round's rendered text. Only games involving `club_name`
/// survive; a block without a marker line is parse noise and never emitted.
pub fn parse_round_text(body: &str, phase: Phase, club_name: &str) -> Vec<CandidateGame> {
    let mut games: Vec<CandidateGame> = Vec::new();
    let mut current: Option<CandidateGame> = None;
    let mut state = ParseState::Idle;

    for line in non_blank_lines(body) {
        let line = line.as_str();

        // A marker always starts a new record, whatever the state.
        if is_marker(line) {
            if let Some(done) = current.take() {
                games.push(done);
            }
            current = Some(CandidateGame {
                number: s!(line),
                phase,
                ..Default::default()
            });
            state = ParseState::Idle;
            continue;
        }

        // Lines before the first marker belong to no game.
        let Some(game) = current.as_mut() else {
            continue;
        };

        if config::VENUE_HINTS.iter().any(|v| line.contains(v)) {
            // first venue line wins
            if game.venue.is_empty() {
                game.venue = s!(line);
            }
        } else if matches_any(line, config::AWAY_MARKERS) {
            state = ParseState::AwaitingAway;
        } else if matches_any(line, config::HOME_MARKERS) {
            state = ParseState::AwaitingHome;
        } else if let Some(caps) = score_re().captures(line) {
            // The source lists the visiting side first.
            game.away_score = caps[1].parse().ok();
            game.home_score = caps[2].parse().ok();
        } else {
            match state {
                ParseState::AwaitingAway if game.away.is_empty() => {
                    if is_short_code(line) {
                        game.away_code = s!(line);
                    } else if line.chars().count() > 3 && !game.away_code.is_empty() {
                        game.away = s!(line);
                        state = ParseState::Idle;
                    }
                }
                ParseState::AwaitingHome if game.home.is_empty() => {
                    if is_short_code(line) {
                        game.home_code = s!(line);
                    } else if line.chars().count() > 3 && !game.home_code.is_empty() {
                        game.home = s!(line);
                        state = ParseState::Idle;
                    }
                }
                // Decorative text; the rendered page is full of it.
                _ => {}
            }
        }
    }
    if let Some(done) = current.take() {
        games.push(done);
    }

    let kept = games
        .into_iter()
        .filter(|g| g.home.contains(club_name) || g.away.contains(club_name))
        .collect::<Vec<_>>();
    debug!("round parse kept {} club games", kept.len());
    kept
}
