//! Read-only leaderboard fetch from the server's REST API.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::error;
use shared::LeaderboardEntry;

/// An in-flight leaderboard request. The HTTP call runs on a worker thread;
/// the frame loop polls for the outcome.
pub struct LeaderboardRequest {
    result: Receiver<Result<Vec<LeaderboardEntry>, String>>,
}

impl LeaderboardRequest {
    /// The fetched rows (or the failure) once available.
    pub fn poll(&self) -> Option<Result<Vec<LeaderboardEntry>, String>> {
        self.result.try_recv().ok()
    }
}

/// Kicks off `GET {http_base}/api/leaderboard`. Failures are logged and
/// surfaced to the caller for inline display; never fatal.
pub fn fetch(http_base: &str) -> LeaderboardRequest {
    let url = format!("{}/api/leaderboard", http_base.trim_end_matches('/'));
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = request(&url).map_err(|e| e.to_string());
        if let Err(reason) = &outcome {
            error!("leaderboard fetch failed: {}", reason);
        }
        let _ = tx.send(outcome);
    });
    LeaderboardRequest { result: rx }
}

fn request(url: &str) -> Result<Vec<LeaderboardEntry>, Box<dyn std::error::Error>> {
    let rows = reqwest::blocking::get(url)?
        .error_for_status()?
        .json::<Vec<LeaderboardEntry>>()?;
    Ok(rows)
}

/// Renders the epoch-milliseconds `matchDate` the server stores.
pub fn format_match_date(epoch_millis: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(epoch_millis) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}
