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

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;

/// Select the cards due at `now`, in priority order: never-scheduled cards
/// first in input order, then ascending due date, ties again preserving
/// input order (the sort is stable, which makes the ordering deterministic
/// for a given input).
pub fn select_due(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    let mut due: Vec<Card> = cards
        .iter()
        .filter(|card| card.is_due(now))
        .cloned()
        .collect();
    due.sort_by(|a, b| match (a.next_review, b.next_review) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    });
    due
}

/// An aggregate snapshot of a card collection's scheduling state.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub total_cards: usize,
    pub due_count: usize,
    pub mean_ease: f64,
    pub mean_interval: f64,
    pub mean_difficulty: f64,
    /// Percentage of the collection not currently due.
    pub completion_rate: f64,
}

impl StudyStats {
    fn empty() -> Self {
        Self {
            total_cards: 0,
            due_count: 0,
            mean_ease: 0.0,
            mean_interval: 0.0,
            mean_difficulty: 0.0,
            completion_rate: 0.0,
        }
    }
}

/// Compute the stats snapshot for a collection. An empty collection yields
/// all zeros rather than dividing by zero.
pub fn compute_stats(cards: &[Card], now: DateTime<Utc>) -> StudyStats {
    let total = cards.len();
    if total == 0 {
        return StudyStats::empty();
    }
    let due = cards.iter().filter(|card| card.is_due(now)).count();
    let mean = |f: fn(&Card) -> f64| cards.iter().map(f).sum::<f64>() / total as f64;
    StudyStats {
        total_cards: total,
        due_count: due,
        mean_ease: mean(|card| card.ease),
        mean_interval: mean(|card| card.interval as f64),
        mean_difficulty: mean(|card| card.difficulty),
        completion_rate: (total - due) as f64 / total as f64 * 100.0,
    }
}
