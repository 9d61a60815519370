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
use chrono::Utc;

use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::ReviewEntry;
use crate::types::deck::DeckSettings;
use crate::types::quality::FivePointQuality;
use crate::types::quality::Quality;

/// The ease ceiling for the four-point recurrence. Fixed at 2.5 even when a
/// deck configures a larger maximum; the five-point strategy has no ceiling.
pub const MAX_EASE: f64 = 2.5;

/// How many trailing history entries feed the recency-based estimates.
pub(crate) const RECENT_WINDOW: usize = 5;

/// Tuning parameters for the SM-2 family of schedulers.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sm2Params {
    /// Lower bound for the ease factor.
    pub min_ease: f64,
    /// Upper bound for any computed interval, in days.
    pub max_interval: u32,
    /// Global multiplier applied to interval growth.
    pub interval_modifier: f64,
}

impl Default for Sm2Params {
    fn default() -> Self {
        Self {
            min_ease: 1.3,
            max_interval: 36500,
            interval_modifier: 1.0,
        }
    }
}

impl Sm2Params {
    pub fn from_settings(settings: &DeckSettings) -> Self {
        Self {
            min_ease: settings.min_ease,
            max_interval: settings.max_interval,
            interval_modifier: settings.interval_modifier,
        }
    }
}

/// The SM-2 scheduler on the four-point quality scale.
///
/// A low grade never resets the card: repetitions always advance and the
/// interval keeps growing, just more slowly, because a failed review only
/// lowers the ease factor. This is deliberately different from the Leitner
/// demotion rule.
#[derive(Clone, Copy, Default, Debug)]
pub struct Sm2 {
    params: Sm2Params,
}

impl Sm2 {
    pub fn new(params: Sm2Params) -> Self {
        Self { params }
    }

    /// Compute the card as it stands after a review at `now`.
    pub fn next_review(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> Fallible<Card> {
        card.check_state()?;
        let ease = self.next_ease(card.ease, quality);
        let interval = self.next_interval(card, ease);
        let entry = ReviewEntry::new(now, quality.value());
        Ok(card.reviewed(interval, interval, ease, card.difficulty, entry, now))
    }

    fn next_ease(&self, ease: f64, quality: Quality) -> f64 {
        let raw = ease + ease_delta(3.0, quality.value() as f64);
        raw.clamp(self.params.min_ease, MAX_EASE)
    }

    fn next_interval(&self, card: &Card, ease: f64) -> u32 {
        let interval = match card.repetitions {
            0 => 1,
            1 => 6,
            _ => (card.interval as f64 * ease * self.params.interval_modifier).round() as u32,
        };
        interval.clamp(1, self.params.max_interval)
    }

    /// A simple difficulty estimate from the recent average grade,
    /// normalized against the top grade. 0.5 for an unreviewed card.
    pub fn card_difficulty(&self, card: &Card) -> f64 {
        let recent = card.recent_history(RECENT_WINDOW);
        if recent.is_empty() {
            return 0.5;
        }
        1.0 - mean_quality(recent) / 3.0
    }

    /// How firmly the card is held, in `[0, 1]`, from interval growth
    /// damped by grade consistency.
    pub fn card_strength(&self, card: &Card) -> f64 {
        if card.review_history.is_empty() {
            return 0.0;
        }
        let base = (card.interval.max(1) as f64).ln() * card.ease;
        let consistency = self.review_consistency(card);
        (base / 100.0 * consistency).min(1.0)
    }

    fn review_consistency(&self, card: &Card) -> f64 {
        let recent = card.recent_history(RECENT_WINDOW);
        if recent.len() < 2 {
            return 1.0;
        }
        let grades: Vec<f64> = recent.iter().map(|entry| entry.quality as f64).collect();
        (1.0 - variance(&grades) / 4.0).max(0.0)
    }
}

/// The SM-2 recurrence on the classic 0-5 grade scale, exposed as a separate
/// named strategy. Its ease formula keys off the six-value scale and has no
/// upper ease clamp, so it is not numerically equivalent to [`Sm2`] at
/// shared grade labels.
#[derive(Clone, Copy, Default, Debug)]
pub struct Sm2FivePoint {
    params: Sm2Params,
}

impl Sm2FivePoint {
    pub fn new(params: Sm2Params) -> Self {
        Self { params }
    }

    pub fn next_review(
        &self,
        card: &Card,
        quality: FivePointQuality,
        now: DateTime<Utc>,
    ) -> Fallible<Card> {
        card.check_state()?;
        let grade = quality.value() as f64;
        let ease = (card.ease + ease_delta(5.0, grade)).max(self.params.min_ease);
        let interval = match card.repetitions {
            0 => 1,
            1 => 6,
            _ => (card.interval as f64 * ease).round() as u32,
        };
        let interval = interval.clamp(1, self.params.max_interval);
        let entry = ReviewEntry::new(now, quality.value());
        // This variant stores the raw grade as the difficulty cache.
        Ok(card.reviewed(interval, interval, ease, grade, entry, now))
    }
}

/// The SM-2 ease delta for a grade `q` on a scale whose top grade is `top`.
pub(crate) fn ease_delta(top: f64, q: f64) -> f64 {
    0.1 - (top - q) * (0.08 + (top - q) * 0.02)
}

pub(crate) fn mean_quality(entries: &[ReviewEntry]) -> f64 {
    let sum: f64 = entries.iter().map(|entry| entry.quality as f64).sum();
    sum / entries.len() as f64
}

/// Population variance. Zero for an empty slice.
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
