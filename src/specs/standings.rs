// src/specs/standings.rs
//! Scraping spec for the standings page.
//!
//! The page repeats the league table (summary + detail section), so rows are
//! collected from every table, rank-sorted, and deduplicated by team name
//! with the first (lowest-ranked) occurrence winning. Rows that fail to
//! parse are dropped, never fatal.

use std::collections::HashSet;
use std::error::Error;

use scraper::{ElementRef, Html, Selector};

use crate::config::ClubConfig;
use crate::core::browser::Surface;
use crate::store::TeamStanding;

pub fn fetch(surface: &dyn Surface, cfg: &ClubConfig) -> Result<Vec<TeamStanding>, Box<dyn Error>> {
    surface.goto(&cfg.standings_url())?;
    let html_doc = surface.html()?;
    Ok(parse_tables(&html_doc))
}

/// Extract the deduplicated, rank-sorted team list from every table in the
/// document.
pub fn parse_tables(html_doc: &str) -> Vec<TeamStanding> {
    let doc = Html::parse_document(html_doc);
    let table_sel = Selector::parse("table").unwrap();
    let row_sel = Selector::parse("tbody tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let mut found: Vec<TeamStanding> = Vec::new();
    for table in doc.select(&table_sel) {
        for row in table.select(&row_sel) {
            let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
            if cells.len() < 5 {
                continue;
            }
            if let Some(team) = parse_row(&cells) {
                found.push(team);
            }
        }
    }

    // Stable sort: equal ranks keep document order, so the dedup below
    // prefers the earliest table.
    found.sort_by_key(|t| t.rank);
    let mut seen: HashSet<String> = HashSet::new();
    found.retain(|t| seen.insert(t.name.clone()));
    found
}

/// One body row: rank, combined code/name cell, W, L, T. Any cell that does
/// not convert makes the whole row invalid.
fn parse_row(cells: &[ElementRef]) -> Option<TeamStanding> {
    let rank: u32 = cell_text(&cells[0]).parse().ok().filter(|r| *r > 0)?;

    // The team cell renders as two lines: short code, then display name.
    // A single-line cell is both.
    let lines = cell_lines(&cells[1]);
    let short_code = lines.first().cloned().unwrap_or_default();
    let name = lines.get(1).cloned().unwrap_or_else(|| cell_text(&cells[1]));
    if name.is_empty() {
        return None;
    }

    let wins: u32 = cell_text(&cells[2]).parse().ok()?;
    let losses: u32 = cell_text(&cells[3]).parse().ok()?;
    let ties: u32 = match cells.get(4) {
        Some(cell) => cell_text(cell).parse().ok()?,
        None => 0,
    };

    Some(TeamStanding { rank, name, short_code, wins, losses, ties })
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Visible lines of a cell, whether the break comes from markup (`<br>`,
/// nested elements) or from literal newlines in one text node.
fn cell_lines(cell: &ElementRef) -> Vec<String> {
    cell.text()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &str) -> String {
        format!("<table><tbody>{rows}</tbody></table>")
    }

    fn row(rank: &str, team: &str, w: &str, l: &str, t: &str) -> String {
        format!("<tr><td>{rank}</td><td>{team}</td><td>{w}</td><td>{l}</td><td>{t}</td></tr>")
    }

    #[test]
    fn parses_ranked_rows() {
        let doc = table(&format!(
            "{}{}",
            row("1", "CG<br>Kutro Crazy Geese", "8", "2", "0"),
            row("2", "VB<br>Vienna Bucks", "6", "4", "1"),
        ));
        let teams = parse_tables(&doc);
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].rank, 1);
        assert_eq!(teams[0].short_code, "CG");
        assert_eq!(teams[0].name, "Kutro Crazy Geese");
        assert_eq!(teams[0].wins, 8);
        assert_eq!(teams[1].ties, 1);
    }

    #[test]
    fn non_numeric_rank_drops_only_that_row() {
        let doc = table(&format!(
            "{}{}",
            row("1", "CG<br>Crazy Geese", "8", "2", "0"),
            row("abc", "VB<br>Vienna Bucks", "6", "4", "0"),
        ));
        let teams = parse_tables(&doc);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Crazy Geese");
    }

    #[test]
    fn non_numeric_stat_drops_the_row() {
        let doc = table(&row("1", "CG<br>Crazy Geese", "8", "-", "0"));
        assert!(parse_tables(&doc).is_empty());
    }

    #[test]
    fn repeated_table_yields_one_entry_per_team() {
        let one = table(&format!(
            "{}{}",
            row("1", "CG<br>Crazy Geese", "8", "2", "0"),
            row("2", "VB<br>Vienna Bucks", "6", "4", "0"),
        ));
        let doc = format!("{one}{one}");
        let teams = parse_tables(&doc);
        assert_eq!(teams.len(), 2);
    }

    #[test]
    fn duplicate_name_keeps_the_lower_rank() {
        let summary = table(&row("3", "CG<br>Crazy Geese", "8", "2", "0"));
        let detail = table(&row("1", "CG<br>Crazy Geese", "8", "2", "0"));
        let doc = format!("{summary}{detail}");
        let teams = parse_tables(&doc);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].rank, 1);
    }

    #[test]
    fn single_line_team_cell_is_code_and_name() {
        let doc = table(&row("1", "Geese", "8", "2", "0"));
        let teams = parse_tables(&doc);
        assert_eq!(teams[0].short_code, "Geese");
        assert_eq!(teams[0].name, "Geese");
    }

    #[test]
    fn short_rows_are_skipped() {
        let doc = table("<tr><td>1</td><td>CG</td><td>8</td></tr>");
        assert!(parse_tables(&doc).is_empty());
    }
}
