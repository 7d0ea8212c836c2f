// src/cli.rs
use std::env;
use std::error::Error;
use std::path::PathBuf;

use crate::config::{self, ClubConfig};
use crate::core::browser::ChromeSurface;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

/// Prints the run as the familiar sectioned report.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn section(&mut self, step: usize, total: usize, title: &str) {
        println!("\n[{step}/{total}] {title}");
    }
    fn log(&mut self, msg: &str) {
        println!("      {msg}");
    }
    fn warn(&mut self, msg: &str) {
        println!("      [WARNING] {msg}");
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cfg = parse_cli()?;

    println!("{}", "=".repeat(60));
    println!("ABF SCRAPER - {}", cfg.club_full_name);
    println!("{}", "=".repeat(60));
    println!("Source: {}", cfg.base_url());

    let surface = ChromeSurface::launch(config::SETTLE_MS)?;
    let mut progress = ConsoleProgress;
    let summary = runner::run(&cfg, &surface, &mut progress)?;

    print_summary(&cfg, &summary);
    Ok(())
}

fn print_summary(cfg: &ClubConfig, summary: &RunSummary) {
    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Standings: {} teams", summary.team_count);
    if let Some(row) = &summary.club_row {
        println!(
            "{}: place {} ({}W-{}L)",
            cfg.club_full_name, row.rank, row.wins, row.losses
        );
    }
    println!("New games: {}", summary.added);
    println!("Games total: {}", summary.past + summary.upcoming);
    println!("  - past: {}", summary.past);
    println!("  - upcoming: {}", summary.upcoming);
    if !summary.unresolved.is_empty() {
        println!("Without game day: {}", summary.unresolved.join(", "));
    }
    println!("{}", "=".repeat(60));
}

fn parse_cli() -> Result<ClubConfig, Box<dyn Error>> {
    let mut season = config::DEFAULT_SEASON;
    let mut data_file: Option<PathBuf> = None;
    let mut max_days: Option<usize> = None;

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--season" => season = args.next().ok_or("Missing value for --season")?.parse()?,
            "--data" => {
                data_file = Some(PathBuf::from(args.next().ok_or("Missing value for --data")?));
            }
            "--max-days" => {
                max_days = Some(args.next().ok_or("Missing value for --max-days")?.parse()?);
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    let mut cfg = ClubConfig::for_season(season);
    if let Some(p) = data_file {
        cfg.data_file = p;
    }
    if let Some(n) = max_days {
        cfg.max_day_pages = n;
    }
    Ok(cfg)
}
