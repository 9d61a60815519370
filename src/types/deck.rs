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

use serde::Deserialize;
use serde::Serialize;

/// Which scheduling recurrence a deck uses.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    /// Ease-and-interval scheduling.
    #[default]
    SuperMemo2,
    /// Box-based scheduling.
    Leitner,
}

/// The slice of deck configuration the scheduler consumes. Produced by the
/// application shell; every field has a fallback so partial configurations
/// deserialize cleanly.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSettings {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Lower bound for the ease factor.
    #[serde(default = "default_min_ease")]
    pub min_ease: f64,
    /// Upper bound for any computed interval, in days.
    #[serde(default = "default_max_interval")]
    pub max_interval: u32,
    /// Global multiplier applied to SM-2 interval growth.
    #[serde(default = "default_interval_modifier")]
    pub interval_modifier: f64,
    #[serde(default = "default_new_cards_per_day")]
    pub new_cards_per_day: u32,
    #[serde(default = "default_review_cards_per_day")]
    pub review_cards_per_day: u32,
}

fn default_min_ease() -> f64 {
    1.3
}

fn default_max_interval() -> u32 {
    // 100 years.
    36500
}

fn default_interval_modifier() -> f64 {
    1.0
}

fn default_new_cards_per_day() -> u32 {
    20
}

fn default_review_cards_per_day() -> u32 {
    100
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            min_ease: default_min_ease(),
            max_interval: default_max_interval(),
            interval_modifier: default_interval_modifier(),
            new_cards_per_day: default_new_cards_per_day(),
            review_cards_per_day: default_review_cards_per_day(),
        }
    }
}
