// src/merge.rs
// Folds freshly scraped games into the persisted past/upcoming lists. The
// only place the dataset is mutated. Identity is equality over a field
// subset, not a hash: reconciliation can leave dates empty, so two rules
// apply depending on whether both sides carry one.

use chrono::NaiveDate;

use crate::store::{GameRecord, GamesBlock};

/// Sorts games without a date after every dated one.
const DATE_SENTINEL: &str = "9999-12-31";

pub const DATE_FMT: &str = "%Y-%m-%d";

/// What a merge changed, for reporting.
#[derive(Debug, Default)]
pub struct MergeReport {
    /// "away @ home (date)" per appended game.
    pub added: Vec<String>,
}

/// Same fixture? With two dates present, date + teams decide. Otherwise the
/// date is unusable and teams + scores decide (both-absent scores match).
/// Two distinct dateless fixtures of the same pairing would collide here;
/// the upstream data leaves no better key.
fn same_fixture(a: &GameRecord, b: &GameRecord) -> bool {
    if !a.date.is_empty() && !b.date.is_empty() {
        a.date == b.date && a.home == b.home && a.away == b.away
    } else {
        a.home == b.home
            && a.away == b.away
            && a.home_score == b.home_score
            && a.away_score == b.away_score
    }
}

/// A game goes to `past` when its date is strictly before today, or, with
/// no usable date, when it already has a result.
fn belongs_to_past(game: &GameRecord, today: NaiveDate) -> bool {
    if !game.date.is_empty() {
        if let Ok(date) = NaiveDate::parse_from_str(&game.date, DATE_FMT) {
            return date < today;
        }
    }
    game.home_score.is_some()
}

fn sort_key(game: &GameRecord) -> String {
    if game.date.is_empty() { s!(DATE_SENTINEL) } else { game.date.clone() }
}

/// Append every candidate not already present, re-sort both lists by date,
/// stamp the update date. Running the same candidates twice is a no-op
/// apart from the stamp.
pub fn merge_games(block: &mut GamesBlock, candidates: Vec<GameRecord>, today: NaiveDate) -> MergeReport {
    let mut report = MergeReport::default();

    for candidate in candidates {
        let known = block
            .past
            .iter()
            .chain(block.upcoming.iter())
            .any(|existing| same_fixture(existing, &candidate));
        if known {
            continue;
        }

        report.added.push(format!(
            "{} @ {} ({})",
            candidate.away,
            candidate.home,
            if candidate.date.is_empty() { "?" } else { &candidate.date }
        ));
        if belongs_to_past(&candidate, today) {
            block.past.push(candidate);
        } else {
            block.upcoming.push(candidate);
        }
    }

    block.past.sort_by_key(sort_key);
    block.upcoming.sort_by_key(sort_key);
    block.last_update = today.format(DATE_FMT).to_string();

    report
}
