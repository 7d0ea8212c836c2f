// tests/pipeline_e2e.rs
// Drives the whole pipeline against a scripted Surface: canned standings
// HTML, canned calendar bodies, and a simulated date picker. No browser,
// no network.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use abf_scrape::config::{self, ClubConfig};
use abf_scrape::core::browser::{SelectOption, Surface};
use abf_scrape::progress::NullProgress;
use abf_scrape::runner;
use abf_scrape::store::{self, Dataset, Phase};

struct FakeSite {
    cfg: ClubConfig,
    current_url: RefCell<String>,
    standings_html: String,
    round_bodies: HashMap<String, String>,
    team_options: Vec<SelectOption>,
    day_pages: Vec<String>,
    day_index: Cell<usize>,
}

impl Surface for FakeSite {
    fn goto(&self, url: &str) -> Result<(), Box<dyn Error>> {
        *self.current_url.borrow_mut() = url.to_string();
        Ok(())
    }

    fn body_text(&self) -> Result<String, Box<dyn Error>> {
        let url = self.current_url.borrow().clone();
        if url == self.cfg.schedule_url() {
            return Ok(self.day_pages[self.day_index.get()].clone());
        }
        Ok(self.round_bodies.get(&url).cloned().unwrap_or_default())
    }

    fn html(&self) -> Result<String, Box<dyn Error>> {
        if *self.current_url.borrow() == self.cfg.standings_url() {
            return Ok(self.standings_html.clone());
        }
        Ok(String::new())
    }

    fn options(&self, selector: &str) -> Result<Vec<SelectOption>, Box<dyn Error>> {
        let opts = match selector {
            config::SEL_ROUND_OPTIONS => vec![
                opt("", "Filtern nach Runde"),
                opt("4907", "Regular Season"),
                opt("4908", "Playoffs"),
            ],
            config::SEL_TEAM_OPTIONS => self.team_options.clone(),
            _ => Vec::new(),
        };
        Ok(opts)
    }

    fn count(&self, selector: &str) -> Result<usize, Box<dyn Error>> {
        Ok(if selector == config::SEL_DATEPICKER_BUTTONS { 3 } else { 0 })
    }

    fn click_nth(&self, _selector: &str, index: usize) -> Result<(), Box<dyn Error>> {
        match index {
            0 => self.day_index.set(self.day_index.get().saturating_sub(1)),
            2 => {
                let next = (self.day_index.get() + 1).min(self.day_pages.len() - 1);
                self.day_index.set(next);
            }
            _ => {}
        }
        Ok(())
    }

    fn pause(&self, _ms: u64) {}
}

fn opt(value: &str, label: &str) -> SelectOption {
    SelectOption { value: value.into(), label: label.into() }
}

fn standings_table() -> String {
    let table = "<table><tbody>\
        <tr><td>1</td><td>CG<br>Kutro Crazy Geese</td><td>8</td><td>2</td><td>0</td></tr>\
        <tr><td>2</td><td>VB<br>Vienna Bucks</td><td>6</td><td>4</td><td>1</td></tr>\
        <tr><td>-</td><td>x</td><td>y</td><td>z</td><td>w</td></tr>\
        </tbody></table>";
    // the page repeats the table in a detail section
    format!("<html><body>{table}{table}</body></html>")
}

fn regular_season_body() -> String {
    [
        "Kalender",
        "#12 - LLO 2026",
        "Geese Ballpark",
        "GAST",
        "VB",
        "Vienna Bucks",
        "3 : 7",
        "HEIM",
        "CG",
        "Kutro Crazy Geese",
        "#13 - LLO 2026",
        "Freudenau Ballpark",
        "GAST",
        "CG",
        "Kutro Crazy Geese",
        "HEIM",
        "WW",
        "Vienna Wanderers",
        "#77 - LLO 2026",
        "GAST",
        "HB",
        "Hard Bulls",
        "HEIM",
        "DD",
        "Danube Dragons",
        "#14 - LLO 2026",
        "GAST",
        "MS",
        "Metrostars",
        "HEIM",
        "CG",
        "Kutro Crazy Geese",
    ]
    .join("\n")
}

fn day_pages() -> Vec<String> {
    vec![
        // before the season, no date stamp
        "Spielplan\nKeine Spiele".into(),
        "16.5.2026, 14:00\n#12 - LLO 2026\nGeese Ballpark\n14:00\nVienna Bucks\nKutro Crazy Geese".into(),
        "20.7.2026, 10:30\n#13 - LLO 2026\nFreudenau Ballpark\n10:30\nKutro Crazy Geese\nVienna Wanderers".into(),
        "27.7.2026, 12:00\nandere Begegnungen".into(),
    ]
}

fn fake_site(cfg: &ClubConfig, with_club: bool) -> FakeSite {
    let mut round_bodies = HashMap::new();
    round_bodies.insert(cfg.round_url("4907", "35667"), regular_season_body());
    round_bodies.insert(cfg.round_url("4908", "35667"), String::from("Keine Spiele"));

    let team_options = if with_club {
        vec![opt("", "Alle Teams"), opt("35667", "Kutro Crazy Geese")]
    } else {
        vec![opt("", "Alle Teams"), opt("35668", "Vienna Bucks")]
    };

    FakeSite {
        cfg: cfg.clone(),
        current_url: RefCell::new(String::new()),
        standings_html: standings_table(),
        round_bodies,
        team_options,
        day_pages: day_pages(),
        day_index: Cell::new(2),
    }
}

fn tmp_data_file(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("abf_e2e_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p.push("data.json");
    p
}

fn test_cfg(name: &str) -> ClubConfig {
    let mut cfg = ClubConfig::for_season(2026);
    cfg.data_file = tmp_data_file(name);
    // the fake picker has few pages; no need for the full budget
    cfg.max_day_pages = 6;
    cfg
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

#[test]
fn full_run_scrapes_reconciles_and_merges() {
    let cfg = test_cfg("full_run");
    store::save(&cfg.data_file, &Dataset::default()).unwrap();
    let site = fake_site(&cfg, true);

    let summary = runner::run_for_date(&cfg, &site, &mut NullProgress, today()).unwrap();

    assert_eq!(summary.team_count, 2);
    assert_eq!(summary.club_row.as_ref().unwrap().rank, 1);
    assert_eq!(summary.added, 3);
    assert_eq!(summary.past, 1);
    assert_eq!(summary.upcoming, 2);
    // #14 never shows up on a day page
    assert_eq!(summary.unresolved, vec!["#14"]);

    let data = store::load(&cfg.data_file).unwrap();
    let played = &data.games.past[0];
    assert_eq!(played.date, "2026-05-16");
    assert_eq!(played.time, "14:00");
    assert_eq!(played.home, "Kutro Crazy Geese");
    assert_eq!(played.away, "Vienna Bucks");
    assert_eq!(played.home_score, Some(7));
    assert_eq!(played.away_score, Some(3));
    assert_eq!(played.venue, "Geese Ballpark");
    assert_eq!(played.phase, Phase::RegularSeason);

    let away_game = data.games.upcoming.iter().find(|g| g.home == "Vienna Wanderers").unwrap();
    assert_eq!(away_game.date, "2026-07-20");
    let dateless = data.games.upcoming.iter().find(|g| g.away == "Metrostars").unwrap();
    assert!(dateless.date.is_empty());
    assert!(dateless.home_score.is_none());

    assert_eq!(data.standings.as_of, "2026-06-01");
    assert_eq!(data.standings.phase, Phase::RegularSeason);
    assert_eq!(data.games.last_update, "2026-06-01");

    // the file speaks the site's schema
    let raw = fs::read_to_string(&cfg.data_file).unwrap();
    assert!(raw.contains("\"vergangene\""));
    assert!(raw.contains("\"naechste\""));
    assert!(raw.contains("\"ergebnis_heim\": 7"));
    assert!(raw.contains("\"kuerzel\": \"CG\""));
}

#[test]
fn rerunning_adds_no_duplicates() {
    let cfg = test_cfg("rerun");
    store::save(&cfg.data_file, &Dataset::default()).unwrap();
    let site = fake_site(&cfg, true);

    runner::run_for_date(&cfg, &site, &mut NullProgress, today()).unwrap();
    let first = store::load(&cfg.data_file).unwrap();

    let summary = runner::run_for_date(&cfg, &site, &mut NullProgress, today()).unwrap();
    let second = store::load(&cfg.data_file).unwrap();

    assert_eq!(summary.added, 0);
    assert_eq!(second.games.past, first.games.past);
    assert_eq!(second.games.upcoming, first.games.upcoming);
}

#[test]
fn missing_club_aborts_before_saving() {
    let cfg = test_cfg("no_club");
    store::save(&cfg.data_file, &Dataset::default()).unwrap();
    let site = fake_site(&cfg, false);

    let err = runner::run_for_date(&cfg, &site, &mut NullProgress, today());
    assert!(err.is_err());

    // last-known-good dataset untouched
    let data = store::load(&cfg.data_file).unwrap();
    assert!(data.standings.teams.is_empty());
    assert!(data.games.past.is_empty());
}
