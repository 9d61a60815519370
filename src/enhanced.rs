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

use crate::error::Fallible;
use crate::sm2::MAX_EASE;
use crate::sm2::RECENT_WINDOW;
use crate::sm2::Sm2Params;
use crate::sm2::ease_delta;
use crate::sm2::mean_quality;
use crate::sm2::variance;
use crate::types::card::Card;
use crate::types::card::ReviewEntry;
use crate::types::quality::Quality;
use crate::types::session::SessionStats;

/// The SM-2 recurrence modulated by session fatigue and historical memory
/// stability. Used when the session orchestrator supplies per-session
/// statistics; without them the plain [`crate::sm2::Sm2`] recurrence applies.
#[derive(Clone, Copy, Default, Debug)]
pub struct Enhanced {
    params: Sm2Params,
}

impl Enhanced {
    pub fn new(params: Sm2Params) -> Self {
        Self { params }
    }

    /// Compute the card as it stands after a review at `now`, with the
    /// interval growth damped by fatigue and scaled by stability.
    pub fn next_review(
        &self,
        card: &Card,
        quality: Quality,
        session: &SessionStats,
        now: DateTime<Utc>,
    ) -> Fallible<Card> {
        card.check_state()?;
        let fatigue = fatigue_factor(session);
        let stability = memory_stability(card);
        let ease = self.next_ease(card.ease, quality, fatigue);
        let raw_interval = match card.repetitions {
            0 => 1,
            1 => 6,
            _ => (card.interval as f64 * ease * stability * (1.0 - fatigue)).round() as u32,
        };
        // The fatigue and stability product can round the interval down to
        // zero; the schedule must still advance by at least one day rather
        // than fall back to "due immediately".
        if raw_interval < 1 {
            log::debug!(
                "card {}: fatigue {fatigue:.2} drove the interval to zero, clamping to one day",
                card.id
            );
        }
        let interval = raw_interval.clamp(1, self.params.max_interval);
        let entry = ReviewEntry {
            date: now,
            quality: quality.value(),
            response_time_seconds: Some(session.mean_response_seconds()),
            fatigue_factor: Some(fatigue),
            stability_factor: Some(stability),
        };
        Ok(card.reviewed(interval, interval, ease, card.difficulty, entry, now))
    }

    fn next_ease(&self, ease: f64, quality: Quality, fatigue: f64) -> f64 {
        let raw = ease + ease_delta(3.0, quality.value() as f64);
        (raw * (1.0 - fatigue)).clamp(self.params.min_ease, MAX_EASE)
    }

    /// A difficulty estimate in `[0, 1]` blending the recent average grade
    /// with the variance of response times. 0.5 for an unreviewed card.
    pub fn difficulty_of(&self, card: &Card) -> f64 {
        let recent = card.recent_history(RECENT_WINDOW);
        if recent.is_empty() {
            return 0.5;
        }
        let quality_term = (1.0 - mean_quality(recent) / 5.0) * 0.7;
        let variance_term = response_time_variance(recent) / 10.0 * 0.3;
        (quality_term + variance_term).clamp(0.0, 1.0)
    }

    /// Forecast the next `n` review dates assuming the card keeps its
    /// current ease. A read-only projection, not a state transition.
    pub fn projected_schedule(
        &self,
        card: &Card,
        n: usize,
        now: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let mut schedule = Vec::with_capacity(n);
        let mut date = now;
        let mut interval = card.interval as f64;
        for _ in 0..n {
            date += Duration::days(interval as i64);
            schedule.push(date);
            interval = (interval * card.ease).round();
        }
        schedule
    }

    /// Suggested session length in minutes for a set of cards: a 20-minute
    /// base scaled up by their mean difficulty. 20 for an empty set.
    pub fn recommended_session_minutes(&self, cards: &[Card]) -> u32 {
        if cards.is_empty() {
            return 20;
        }
        let total: f64 = cards.iter().map(|card| self.difficulty_of(card)).sum();
        let mean = total / cards.len() as f64;
        (20.0 * (1.0 + mean)).round() as u32
    }
}

/// Session-level fatigue, floored at zero. Reviewing many cards and long
/// sessions raise it; a streak of correct answers works it back off.
pub fn fatigue_factor(session: &SessionStats) -> f64 {
    let review_fatigue = (session.cards_reviewed as f64 * 0.01).min(0.5);
    let time_fatigue = (session.time_spent_seconds / 3600.0 * 0.1).min(0.3);
    let recovery = (session.consecutive_correct as f64 * 0.05).min(0.4);
    (review_fatigue + time_fatigue - recovery).max(0.0)
}

/// Historical memory stability: 1.0 for an unreviewed card, otherwise 0.8
/// plus a bonus from the recent average grade (four-point values, read
/// directly).
pub fn memory_stability(card: &Card) -> f64 {
    let recent = card.recent_history(RECENT_WINDOW);
    if recent.is_empty() {
        return 1.0;
    }
    0.8 + mean_quality(recent) / 5.0 * 0.2
}

/// Variance of the recorded response times. Entries without one are
/// skipped, and fewer than two data points carry no variance signal.
fn response_time_variance(entries: &[ReviewEntry]) -> f64 {
    let times: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.response_time_seconds)
        .collect();
    if times.len() < 2 {
        return 0.0;
    }
    variance(&times)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rested_session() -> SessionStats {
        SessionStats::new()
    }

    fn tired_session() -> SessionStats {
        SessionStats {
            cards_reviewed: 60,
            time_spent_seconds: 3600.0,
            consecutive_correct: 0,
        }
    }

    #[test]
    fn test_fatigue_is_zero_for_fresh_session() {
        assert_eq!(fatigue_factor(&rested_session()), 0.0);
    }

    #[test]
    fn test_fatigue_components_saturate() {
        // 60 cards caps the review term at 0.5 and an hour caps the time
        // term at 0.1 * 1.0; no streak, so f = 0.5 + 0.1.
        let fatigue = fatigue_factor(&tired_session());
        assert!((fatigue - 0.6).abs() < 1e-9);
        let marathon = SessionStats {
            cards_reviewed: 1000,
            time_spent_seconds: 100_000.0,
            consecutive_correct: 0,
        };
        assert!((fatigue_factor(&marathon) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_streak_recovers_fatigue_but_never_below_zero() {
        let session = SessionStats {
            cards_reviewed: 10,
            time_spent_seconds: 300.0,
            consecutive_correct: 20,
        };
        assert_eq!(fatigue_factor(&session), 0.0);
    }

    #[test]
    fn test_stability_for_unreviewed_card() {
        let card = Card::new("c1", "front", "back");
        assert_eq!(memory_stability(&card), 1.0);
    }

    #[test]
    fn test_stability_from_recent_grades() {
        let now = Utc::now();
        let mut card = Card::new("c1", "front", "back");
        for _ in 0..5 {
            card.review_history.push(ReviewEntry::new(now, 3));
        }
        // avg 3 on the four-point scale: 0.8 + 3/5 * 0.2 = 0.92.
        assert!((memory_stability(&card) - 0.92).abs() < 1e-9);
    }

    #[test]
    fn test_first_two_reviews_ignore_fatigue() {
        let scheduler = Enhanced::default();
        let card = Card::new("c1", "front", "back");
        let card = scheduler
            .next_review(&card, Quality::Good, &tired_session(), Utc::now())
            .unwrap();
        assert_eq!(card.interval, 1);
        let card = scheduler
            .next_review(&card, Quality::Good, &tired_session(), Utc::now())
            .unwrap();
        assert_eq!(card.interval, 6);
    }

    #[test]
    fn test_fatigued_session_still_advances_a_day() {
        let scheduler = Enhanced::default();
        let mut card = Card::new("c1", "front", "back");
        card.interval = 1;
        card.repetitions = 2;
        card.ease = 1.3;
        card.review_history
            .push(ReviewEntry::new(Utc::now(), 0));
        card.review_history
            .push(ReviewEntry::new(Utc::now(), 0));
        let card = scheduler
            .next_review(&card, Quality::Again, &tired_session(), Utc::now())
            .unwrap();
        // 1 * 1.3 * 0.8 * 0.4 rounds to zero; the clamp keeps it at one day.
        assert_eq!(card.interval, 1);
        assert_eq!(card.repetitions, 3);
    }

    #[test]
    fn test_fatigue_damps_ease() {
        let scheduler = Enhanced::default();
        let card = Card::new("c1", "front", "back");
        let rested = scheduler
            .next_review(&card, Quality::Good, &rested_session(), Utc::now())
            .unwrap();
        let tired = scheduler
            .next_review(&card, Quality::Good, &tired_session(), Utc::now())
            .unwrap();
        assert_eq!(rested.ease, 2.5);
        // 2.5 * (1 - 0.6) = 1.0, clamped up to the ease floor.
        assert_eq!(tired.ease, 1.3);
    }

    #[test]
    fn test_history_entry_carries_session_measurements() {
        let scheduler = Enhanced::default();
        let session = SessionStats {
            cards_reviewed: 10,
            time_spent_seconds: 50.0,
            consecutive_correct: 0,
        };
        let card = Card::new("c1", "front", "back");
        let card = scheduler
            .next_review(&card, Quality::Good, &session, Utc::now())
            .unwrap();
        let entry = card.review_history.last().unwrap();
        assert_eq!(entry.response_time_seconds, Some(5.0));
        assert!(entry.fatigue_factor.is_some());
        assert_eq!(entry.stability_factor, Some(1.0));
    }

    #[test]
    fn test_empty_session_produces_zero_response_time() {
        let scheduler = Enhanced::default();
        let card = Card::new("c1", "front", "back");
        let card = scheduler
            .next_review(&card, Quality::Good, &rested_session(), Utc::now())
            .unwrap();
        let entry = card.review_history.last().unwrap();
        assert_eq!(entry.response_time_seconds, Some(0.0));
    }

    #[test]
    fn test_difficulty_blend() {
        let scheduler = Enhanced::default();
        let card = Card::new("c1", "front", "back");
        assert_eq!(scheduler.difficulty_of(&card), 0.5);

        let now = Utc::now();
        let mut card = Card::new("c2", "front", "back");
        for _ in 0..5 {
            card.review_history.push(ReviewEntry {
                date: now,
                quality: 0,
                response_time_seconds: Some(5.0),
                fatigue_factor: None,
                stability_factor: None,
            });
        }
        // Worst grades, uniform response times: 0.7 from the quality term.
        assert!((scheduler.difficulty_of(&card) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_needs_two_samples_for_variance() {
        let scheduler = Enhanced::default();
        let mut card = Card::new("c1", "front", "back");
        card.review_history.push(ReviewEntry {
            date: Utc::now(),
            quality: 5,
            response_time_seconds: Some(100.0),
            fatigue_factor: None,
            stability_factor: None,
        });
        // A single sample contributes no variance term.
        assert_eq!(scheduler.difficulty_of(&card), 0.0);
    }

    #[test]
    fn test_projected_schedule_length_and_growth() {
        let scheduler = Enhanced::default();
        let now = Utc::now();
        let mut card = Card::new("c1", "front", "back");
        card.interval = 2;
        card.ease = 2.0;
        let schedule = scheduler.projected_schedule(&card, 5, now);
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[0], now + Duration::days(2));
        assert_eq!(schedule[1], schedule[0] + Duration::days(4));
        assert_eq!(schedule[2], schedule[1] + Duration::days(8));
        assert!(schedule.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_recommended_session_minutes() {
        let scheduler = Enhanced::default();
        assert_eq!(scheduler.recommended_session_minutes(&[]), 20);
        let card = Card::new("c1", "front", "back");
        // One unreviewed card has difficulty 0.5: 20 * 1.5 = 30.
        assert_eq!(scheduler.recommended_session_minutes(&[card]), 30);
    }
}
