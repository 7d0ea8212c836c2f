// src/progress.rs
/// Lightweight progress reporting for the scrape run.
/// Frontends implement this to surface status to users; library code never
/// prints on its own.
pub trait Progress {
    /// A new pipeline section starts ("[2/3] GAMES").
    fn section(&mut self, _step: usize, _total: usize, _title: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Something went wrong but the run continues.
    fn warn(&mut self, _msg: &str) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
