// src/specs/schedule.rs
//! Scraping spec for the schedule page: supplies the real fixture dates.
//!
//! The calendar page prints today's date on every game (upstream bug), so
//! the true date/time comes from here. The schedule shows one game day at a
//! time behind a date picker that only steps a day per click and has no
//! direct seek. Strategy: over-shoot backwards to before the season start,
//! then walk forward day by day, scanning each page's text for the pending
//! game markers. Games still pending when the step budget runs out keep an
//! empty date; callers report them and carry on.

use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::config::{self, ClubConfig};
use crate::core::browser::Surface;
use crate::core::text::char_window;
use crate::progress::Progress;
use crate::specs::calendar::CandidateGame;

/// Date and time the page header shows for the displayed game day.
pub struct PageStamp {
    pub date: String,
    pub time: String,
}

fn stamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "16.5.2026, 14:00" as rendered in the page header
    RE.get_or_init(|| Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4}),\s*(\d{1,2}:\d{2})").unwrap())
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}:\d{2}").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#\d+").unwrap())
}

/// Leading "#12" of a stored marker line, the key games are matched under.
pub fn marker_key(number: &str) -> Option<String> {
    number_re().find(number).map(|m| s!(m.as_str()))
}

/// First date/time stamp on the page, date normalized to ISO.
pub fn page_stamp(body: &str) -> Option<PageStamp> {
    let caps = stamp_re().captures(body)?;
    let date = format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
    Some(PageStamp { date, time: s!(&caps[4]) })
}

/// Which pending games this day page shows, with their throw times.
/// A marker only counts when the club name appears within the lookahead
/// window after it; the window's first time beats the page-level time.
pub fn scan_page(
    body: &str,
    pending: &BTreeSet<String>,
    club_name: &str,
    page_time: &str,
) -> Vec<(String, String)> {
    let mut hits = Vec::new();
    for key in pending {
        let needle = format!("{key} -");
        let Some(pos) = body.find(&needle) else {
            continue;
        };
        let window = char_window(body, pos, config::LOOKAHEAD_CHARS);
        if !window.contains(club_name) {
            continue;
        }
        let time = time_re()
            .find(&window)
            .map(|m| s!(m.as_str()))
            .unwrap_or_else(|| s!(page_time));
        hits.push((key.clone(), time));
    }
    hits
}

/// Fill `date`/`time` in as many games as the step budget allows.
/// Returns the marker keys that stayed unresolved.
pub fn reconcile(
    surface: &dyn Surface,
    cfg: &ClubConfig,
    games: &mut [CandidateGame],
    progress: &mut dyn Progress,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut lookup: HashMap<String, usize> = HashMap::new();
    for (i, game) in games.iter().enumerate() {
        if let Some(key) = marker_key(&game.number) {
            lookup.insert(key, i);
        }
    }
    let mut pending: BTreeSet<String> = lookup.keys().cloned().collect();
    if pending.is_empty() {
        return Ok(Vec::new());
    }
    progress.log(&format!("searching dates for {} games", pending.len()));

    surface.goto(&cfg.schedule_url())?;
    // the date-picker widget initializes after the page itself
    surface.pause(config::SCHEDULE_SETTLE_MS);

    // Arrow buttons: [0] back a day, [1] calendar popup, [2] forward a day.
    if surface.count(config::SEL_DATEPICKER_BUTTONS)? < 3 {
        progress.warn("date picker buttons not found, dates stay empty");
        return Ok(pending.into_iter().collect());
    }

    // Rewind to before the season start.
    for _ in 0..config::SEEK_BACK_STEPS {
        surface.click_nth(config::SEL_DATEPICKER_BUTTONS, 0)?;
        surface.pause(config::STEP_PAUSE_MS);
    }
    surface.pause(config::SEEK_SETTLE_MS);

    for step in 0..cfg.max_day_pages {
        surface.pause(config::PAGE_PAUSE_MS);
        let body = surface.body_text()?;

        if let Some(stamp) = page_stamp(&body) {
            for (key, time) in scan_page(&body, &pending, &cfg.club_name, &stamp.time) {
                let game = &mut games[lookup[&key]];
                game.date = stamp.date.clone();
                game.time = time.clone();
                pending.remove(&key);
                progress.log(&format!("  {key}: {} {time}", stamp.date));
            }
        } else {
            debug!("day page {step} carries no date stamp");
        }

        if pending.is_empty() {
            progress.log("all game days found");
            break;
        }
        surface.click_nth(config::SEL_DATEPICKER_BUTTONS, 2)?;
    }

    Ok(pending.into_iter().collect())
}
