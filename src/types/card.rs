// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::SchedulerError;

/// The ease factor a card starts with.
pub const INITIAL_EASE: f64 = 2.5;

/// A single review event. Entries are append-only and their order is
/// load-bearing: recency-based calculations read the last N entries.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    /// When the review happened.
    pub date: DateTime<Utc>,
    /// The raw grade, on the scale of the strategy that recorded it.
    pub quality: u8,
    /// Mean seconds per card in the session that produced this review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_seconds: Option<f64>,
    /// The session fatigue at review time, when the enhanced scheduler ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue_factor: Option<f64>,
    /// The card's historical stability at review time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability_factor: Option<f64>,
}

impl ReviewEntry {
    /// A plain entry with no session-derived measurements.
    pub fn new(date: DateTime<Utc>, quality: u8) -> Self {
        Self {
            date,
            quality,
            response_time_seconds: None,
            fatigue_factor: None,
            stability_factor: None,
        }
    }
}

/// The unit of learning material and scheduling state. The schedulers never
/// inspect `front` or `back`; they only read and rewrite the scheduling
/// fields, producing a new value on every review.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Opaque identifier, stable for the card's lifetime.
    pub id: String,
    pub front: String,
    pub back: String,
    /// Days until the next review. Under Leitner this field holds the
    /// current box number instead; the due date is derived from it.
    #[serde(default)]
    pub interval: u32,
    /// The SM-2 ease factor.
    #[serde(default = "default_ease")]
    pub ease: f64,
    /// How many scheduling passes the card has been through. Advances on
    /// every review regardless of grade.
    #[serde(default)]
    pub repetitions: u32,
    /// When the card is next due. Absent means "due now": the card has
    /// never been reviewed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_history: Vec<ReviewEntry>,
    /// Cache of recent performance. Recomputed by the schedulers, never
    /// authoritative.
    #[serde(default)]
    pub difficulty: f64,
}

fn default_ease() -> f64 {
    INITIAL_EASE
}

impl Card {
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            interval: 0,
            ease: INITIAL_EASE,
            repetitions: 0,
            next_review: None,
            last_reviewed: None,
            review_history: Vec::new(),
            difficulty: 0.0,
        }
    }

    /// Whether the card has arrived at its scheduled review time.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            None => true,
            Some(due) => due <= now,
        }
    }

    /// The last `n` history entries, oldest first.
    pub fn recent_history(&self, n: usize) -> &[ReviewEntry] {
        let start = self.review_history.len().saturating_sub(n);
        &self.review_history[start..]
    }

    /// Check that the scheduling fields hold the documented invariants. The
    /// schedulers call this before reading any state, and never repair a
    /// malformed card.
    pub fn check_state(&self) -> Fallible<()> {
        if !self.ease.is_finite() || self.ease <= 0.0 {
            return Err(SchedulerError::InvalidCardState {
                id: self.id.clone(),
                reason: format!("ease factor {} is not a positive number", self.ease),
            });
        }
        if self.review_history.len() != self.repetitions as usize {
            return Err(SchedulerError::InvalidCardState {
                id: self.id.clone(),
                reason: format!(
                    "review history has {} entries but repetitions is {}",
                    self.review_history.len(),
                    self.repetitions
                ),
            });
        }
        Ok(())
    }

    /// The updated card value for a completed review. `interval` is what the
    /// interval field will store (days, or the Leitner box number), while
    /// `due_in_days` is the actual distance to the next review.
    pub(crate) fn reviewed(
        &self,
        interval: u32,
        due_in_days: u32,
        ease: f64,
        difficulty: f64,
        entry: ReviewEntry,
        now: DateTime<Utc>,
    ) -> Card {
        let mut card = self.clone();
        card.interval = interval;
        card.ease = ease;
        card.repetitions += 1;
        card.difficulty = difficulty;
        card.last_reviewed = Some(now);
        card.next_review = Some(now + Duration::days(due_in_days as i64));
        card.review_history.push(entry);
        card
    }
}
