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
use crate::types::quality::Performance;

/// The highest Leitner box. Box N is reviewed every `2^(N-1)` days, so the
/// ladder runs 1, 2, 4, 8, 16 days.
pub const MAX_BOX: u32 = 5;

/// The Leitner box scheduler. A correct answer promotes the card one box, a
/// wrong one demotes it one box. The ease factor is carried through
/// untouched, and the card's `interval` field stores the box number rather
/// than a day count.
#[derive(Clone, Copy, Default, Debug)]
pub struct Leitner;

impl Leitner {
    pub fn new() -> Self {
        Self
    }

    /// Compute the card as it stands after a review at `now`.
    pub fn next_review(
        &self,
        card: &Card,
        performance: Performance,
        now: DateTime<Utc>,
    ) -> Fallible<Card> {
        card.check_state()?;
        // The interval field doubles as the box number under this strategy.
        // An unreviewed card sits in box 0 and enters box 1 either way. A
        // card carried over from an SM-2 deck can hold a day count far above
        // the ladder; anything past the top box is treated as the top box so
        // the derived day distance stays within the ladder.
        let current_box = card.interval.min(MAX_BOX);
        let new_box = if performance.is_correct() {
            (current_box + 1).min(MAX_BOX)
        } else {
            current_box.saturating_sub(1).max(1)
        };
        let due_in_days = 1u32 << (new_box - 1);
        // Rescaled to 0-5 for storage parity with the SM-2 history.
        let difficulty = performance.value() * 5.0;
        let entry = ReviewEntry::new(now, difficulty.round() as u8);
        Ok(card.reviewed(new_box, due_in_days, card.ease, difficulty, entry, now))
    }
}
