//! Screen-reader announcements
//!
//! A single polite, atomic live region. Each announcement overwrites the
//! region text at once and schedules a clear 5 seconds later. Scheduled
//! clears are never cancelled, so an older deadline can wipe a newer message
//! that was written less than 5 seconds before it fires.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Delay before an announcement is cleared from the live region
pub const CLEAR_AFTER: Duration = Duration::from_millis(5000);

/// Number of past announcements kept for the transcript
const HISTORY_LIMIT: usize = 20;

/// The accessible live region element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRegion {
    /// `aria-live` value
    pub politeness: &'static str,
    pub atomic: bool,
    pub text: String,
}

/// A past announcement, kept for the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub at: Instant,
}

/// Single-slot, auto-expiring announcement channel
#[derive(Debug)]
pub struct Announcer {
    region: LiveRegion,
    /// Pending clear deadlines, oldest first
    pending_clears: VecDeque<Instant>,
    history: VecDeque<Announcement>,
}

impl Announcer {
    /// Create the live region; done once per application
    pub fn new() -> Self {
        Self {
            region: LiveRegion {
                politeness: "polite",
                atomic: true,
                text: String::new(),
            },
            pending_clears: VecDeque::new(),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    pub fn region(&self) -> &LiveRegion {
        &self.region
    }

    /// Current region text, empty when nothing is being announced
    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.region.text
    }

    /// Write `message` into the live region and schedule its clear
    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::info!(target: "triage_tui::a11y", "announce: {message}");

        self.region.text = message.clone();
        self.pending_clears.push_back(now + CLEAR_AFTER);

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Announcement { message, at: now });
    }

    /// Fire every clear whose deadline has passed.
    ///
    /// Returns true if the region text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut cleared = false;
        while self.pending_clears.front().is_some_and(|d| *d <= now) {
            self.pending_clears.pop_front();
            if !self.region.text.is_empty() {
                self.region.text.clear();
                cleared = true;
            }
        }
        cleared
    }

    #[cfg(test)]
    pub fn pending_clears(&self) -> usize {
        self.pending_clears.len()
    }

    /// Past announcements, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Announcement> {
        self.history.iter()
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new()
    }
}
