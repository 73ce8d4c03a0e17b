use chrono::{DateTime, TimeZone};
use eloelo_shared::{
    domain::{Side, WinScale},
    duration::{elapsed_string, is_valid_duration_string, parse_duration_string, serialize_duration_seconds},
    protocol::{FinishMatch, UiCommand},
};

const DEFAULT_DURATION: &str = "45m";

/// Local state of the finish-match modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishMatchForm {
    open: bool,
    winner: Option<Side>,
    fake: bool,
    duration: String,
}

impl FinishMatchForm {
    /// Opens for a reported winner, pre-filled with the time since the match
    /// started. Without a known start the default match length is used.
    pub fn show_for_winner<Tz: TimeZone>(
        winner: Side,
        started_at: Option<&DateTime<Tz>>,
        now: &DateTime<Tz>,
    ) -> Self {
        let duration = started_at
            .map(|start| elapsed_string(start, now))
            .unwrap_or_else(|| DEFAULT_DURATION.to_string());
        Self {
            open: true,
            winner: Some(winner),
            fake: false,
            duration,
        }
    }

    /// Opens for backfilling a match that was never started in the client.
    pub fn show_fake() -> Self {
        Self {
            open: true,
            winner: None,
            fake: true,
            duration: DEFAULT_DURATION.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Only fake results let the operator pick the winner.
    pub fn shows_winner_choice(&self) -> bool {
        self.fake
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn set_winner(&mut self, winner: Side) {
        self.winner = Some(winner);
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn duration_mut(&mut self) -> &mut String {
        &mut self.duration
    }

    pub fn set_duration(&mut self, duration: impl Into<String>) {
        self.duration = duration.into();
    }

    pub fn duration_valid(&self) -> bool {
        is_valid_duration_string(Some(&self.duration))
    }

    pub fn heading(&self) -> String {
        if self.fake {
            return "Enter fake result".to_string();
        }
        let team = self.winner.unwrap_or(Side::Right).label();
        format!("{team} won! How it went?")
    }

    pub fn submit_enabled(&self) -> bool {
        self.duration_valid() && self.winner.is_some()
    }

    /// Builds `finish_match` for the chosen scale and closes the form.
    /// Returns `None`, leaving the form untouched, while submit is disabled.
    pub fn submit(&mut self, scale: WinScale) -> Option<UiCommand> {
        let winner = self.winner?;
        let seconds = parse_duration_string(&self.duration).ok()?;
        let command = UiCommand::FinishMatch(FinishMatch::Finished {
            winner,
            scale,
            duration: serialize_duration_seconds(seconds),
            fake: self.fake,
        });
        self.close();
        Some(command)
    }
}
