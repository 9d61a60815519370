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

use crate::enhanced::Enhanced;
use crate::error::Fallible;
use crate::leitner::Leitner;
use crate::sm2::Sm2;
use crate::sm2::Sm2Params;
use crate::types::card::Card;
use crate::types::deck::Algorithm;
use crate::types::deck::DeckSettings;
use crate::types::quality::Performance;
use crate::types::quality::Quality;
use crate::types::session::SessionStats;

/// A deck-level scheduler: dispatches each review to the recurrence the
/// deck is configured for and returns the updated card value. Constructed
/// per deck by the session orchestrator and passed by reference; it holds
/// no mutable state, so every call is a pure transformation.
#[derive(Clone, Copy, Debug)]
pub struct DeckScheduler {
    algorithm: Algorithm,
    sm2: Sm2,
    enhanced: Enhanced,
    leitner: Leitner,
}

impl DeckScheduler {
    pub fn new(settings: &DeckSettings) -> Self {
        let params = Sm2Params::from_settings(settings);
        Self {
            algorithm: settings.algorithm,
            sm2: Sm2::new(params),
            enhanced: Enhanced::new(params),
            leitner: Leitner::new(),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The single review entry point. Malformed cards are rejected before
    /// any computation, so a failed call never leaves a partial update; the
    /// caller can fix the input and retry. When session statistics are
    /// supplied, an SM-2 deck schedules through the enhanced recurrence.
    pub fn review(
        &self,
        card: &Card,
        quality: Quality,
        session: Option<&SessionStats>,
        now: DateTime<Utc>,
    ) -> Fallible<Card> {
        match self.algorithm {
            Algorithm::Leitner => {
                log::debug!("card {}: scheduling via the Leitner recurrence", card.id);
                self.leitner.next_review(card, Performance::from(quality), now)
            }
            Algorithm::SuperMemo2 => match session {
                Some(session) => {
                    log::debug!("card {}: scheduling via the enhanced recurrence", card.id);
                    self.enhanced.next_review(card, quality, session, now)
                }
                None => {
                    log::debug!("card {}: scheduling via the SM-2 recurrence", card.id);
                    self.sm2.next_review(card, quality, now)
                }
            },
        }
    }

    /// Review with a raw numeric grade, as received from an external shell.
    /// Out-of-range grades are rejected before any state is read.
    pub fn review_raw(
        &self,
        card: &Card,
        quality: u8,
        session: Option<&SessionStats>,
        now: DateTime<Utc>,
    ) -> Fallible<Card> {
        let quality = Quality::from_value(quality)?;
        self.review(card, quality, session, now)
    }
}

impl Default for DeckScheduler {
    fn default() -> Self {
        Self::new(&DeckSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulerError;

    #[test]
    fn test_sm2_deck_without_session_stats() {
        let scheduler = DeckScheduler::default();
        let card = Card::new("c1", "front", "back");
        let card = scheduler
            .review(&card, Quality::Good, None, Utc::now())
            .unwrap();
        assert_eq!(card.interval, 1);
        let entry = card.review_history.last().unwrap();
        assert!(entry.fatigue_factor.is_none());
    }

    #[test]
    fn test_sm2_deck_with_session_stats_uses_enhanced_path() {
        let scheduler = DeckScheduler::default();
        let session = SessionStats::new();
        let card = Card::new("c1", "front", "back");
        let card = scheduler
            .review(&card, Quality::Good, Some(&session), Utc::now())
            .unwrap();
        let entry = card.review_history.last().unwrap();
        assert!(entry.fatigue_factor.is_some());
        assert!(entry.stability_factor.is_some());
    }

    #[test]
    fn test_leitner_deck_maps_quality_to_performance() {
        let settings = DeckSettings {
            algorithm: Algorithm::Leitner,
            ..DeckSettings::default()
        };
        let scheduler = DeckScheduler::new(&settings);
        let mut card = Card::new("c1", "front", "back");
        card.interval = 2;
        let promoted = scheduler
            .review(&card, Quality::Good, None, Utc::now())
            .unwrap();
        assert_eq!(promoted.interval, 3);
        let demoted = scheduler
            .review(&card, Quality::Hard, None, Utc::now())
            .unwrap();
        assert_eq!(demoted.interval, 1);
    }

    #[test]
    fn test_review_raw_rejects_out_of_range_grade() {
        let scheduler = DeckScheduler::default();
        let card = Card::new("c1", "front", "back");
        let result = scheduler.review_raw(&card, 9, None, Utc::now());
        assert_eq!(
            result,
            Err(SchedulerError::InvalidQuality { value: 9, max: 3 })
        );
    }

    #[test]
    fn test_malformed_card_rejected_before_update() {
        let scheduler = DeckScheduler::default();
        let mut card = Card::new("c1", "front", "back");
        card.ease = 0.0;
        assert!(scheduler
            .review(&card, Quality::Good, None, Utc::now())
            .is_err());
    }

    #[test]
    fn test_deck_settings_reach_the_recurrence() {
        let settings = DeckSettings {
            max_interval: 8,
            ..DeckSettings::default()
        };
        let scheduler = DeckScheduler::new(&settings);
        let mut card = Card::new("c1", "front", "back");
        for _ in 0..5 {
            card = scheduler
                .review(&card, Quality::Good, None, Utc::now())
                .unwrap();
        }
        assert_eq!(card.interval, 8);
    }
}
