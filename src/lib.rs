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

//! A spaced repetition scheduling engine.
//!
//! This crate decides, for each flashcard, when it should next be shown to
//! a learner and how its memory-strength parameters evolve after each
//! review. It implements two interchangeable strategies, an SM-2
//! ease-and-interval recurrence and a Leitner box ladder, plus an enhanced
//! SM-2 variant that folds in session fatigue and historical recall
//! stability. Persistence, rendering, and notification are the calling
//! application's concern: every operation here takes immutable values and
//! an explicit clock and returns a new card value.
//!
//! ```
//! use cardsched::queue::select_due;
//! use cardsched::scheduler::DeckScheduler;
//! use cardsched::types::card::Card;
//! use cardsched::types::deck::DeckSettings;
//! use cardsched::types::quality::Quality;
//!
//! let scheduler = DeckScheduler::new(&DeckSettings::default());
//! let card = Card::new("card-1", "Wasser", "water");
//! let now = chrono::Utc::now();
//! let card = scheduler.review(&card, Quality::Good, None, now).unwrap();
//! assert_eq!(card.interval, 1);
//! assert!(select_due(&[card], now).is_empty());
//! ```

pub mod enhanced;
pub mod error;
pub mod leitner;
pub mod queue;
pub mod scheduler;
pub mod sm2;
pub mod types;

pub use crate::error::Fallible;
pub use crate::error::SchedulerError;
pub use crate::scheduler::DeckScheduler;
pub use crate::types::card::Card;
pub use crate::types::card::ReviewEntry;
pub use crate::types::deck::Algorithm;
pub use crate::types::deck::DeckSettings;
pub use crate::types::quality::FivePointQuality;
pub use crate::types::quality::Performance;
pub use crate::types::quality::Quality;
pub use crate::types::session::SessionStats;
