// src/runner.rs
// Top-level pipeline, in the order the data depends on itself: standings,
// round/team discovery, per-round calendar scrape, date reconciliation,
// merge, save. The dataset file is read once here and written once at the
// end; everything in between works on transient candidates.

use std::error::Error;

use chrono::{Datelike, Local, NaiveDate};
use log::info;

use crate::config::ClubConfig;
use crate::core::browser::Surface;
use crate::merge::{self, DATE_FMT};
use crate::progress::Progress;
use crate::specs::{calendar, schedule, standings};
use crate::store::{self, Phase, TeamStanding};

/// What a run did, for the closing summary.
pub struct RunSummary {
    pub team_count: usize,
    pub club_row: Option<TeamStanding>,
    pub added: usize,
    pub past: usize,
    pub upcoming: usize,
    pub unresolved: Vec<String>,
}

pub fn run(
    cfg: &ClubConfig,
    surface: &dyn Surface,
    progress: &mut dyn Progress,
) -> Result<RunSummary, Box<dyn Error>> {
    run_for_date(cfg, surface, progress, Local::now().date_naive())
}

/// Split out so tests can pin "today".
pub fn run_for_date(
    cfg: &ClubConfig,
    surface: &dyn Surface,
    progress: &mut dyn Progress,
    today: NaiveDate,
) -> Result<RunSummary, Box<dyn Error>> {
    let mut data = store::load(&cfg.data_file)?;
    let existing = data.games.past.len() + data.games.upcoming.len();
    info!("loaded dataset with {existing} games");

    // 1. League table. An empty result keeps the previous snapshot.
    progress.section(1, 3, "STANDINGS");
    let teams = standings::fetch(surface, cfg)?;
    progress.log(&format!("found {} teams", teams.len()));
    if !teams.is_empty() {
        data.standings.teams = teams;
        data.standings.as_of = today.format(DATE_FMT).to_string();
        data.standings.phase = Phase::for_month(today.month());
    }
    let club_row = data
        .standings
        .teams
        .iter()
        .find(|t| t.name.contains(&cfg.club_name))
        .cloned();
    if let Some(row) = &club_row {
        progress.log(&format!(
            "{}: place {} ({}W-{}L)",
            cfg.club_full_name, row.rank, row.wins, row.losses
        ));
    }

    // 2. Games from the calendar, one pass per round. Discovery failures
    // abort before the dataset is touched on disk.
    progress.section(2, 3, "GAMES (calendar)");
    let disc = calendar::discover(surface, cfg)?;
    progress.log(&format!(
        "rounds: {}",
        disc.rounds.iter().map(|r| r.label.as_str()).collect::<Vec<_>>().join(", ")
    ));
    progress.log(&format!("team id: {}", disc.team_id));
    let mut games = calendar::fetch_games(surface, cfg, &disc, progress)?;
    progress.log(&format!("total: {} games", games.len()));

    // 3. Real game days from the schedule page.
    progress.section(3, 3, "GAME DAYS (schedule)");
    let unresolved = if games.is_empty() {
        Vec::new()
    } else {
        schedule::reconcile(surface, cfg, &mut games, progress)?
    };
    if !unresolved.is_empty() {
        progress.warn(&format!("no game day found for: {}", unresolved.join(", ")));
    }

    // 4. Merge and save.
    let candidates = games.into_iter().map(calendar::CandidateGame::into_record).collect();
    let report = merge::merge_games(&mut data.games, candidates, today);
    for line in &report.added {
        progress.log(&format!("+ NEW: {line}"));
    }
    store::save(&cfg.data_file, &data)?;
    progress.log(&format!("saved: {}", cfg.data_file.display()));

    Ok(RunSummary {
        team_count: data.standings.teams.len(),
        club_row,
        added: report.added.len(),
        past: data.games.past.len(),
        upcoming: data.games.upcoming.len(),
        unresolved,
    })
}
