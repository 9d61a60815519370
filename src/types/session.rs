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

/// Running statistics for one study session, maintained by the session
/// orchestrator and fed to the enhanced scheduler. Ephemeral: scoped to a
/// single session and discarded when it ends, never persisted.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SessionStats {
    /// Cards reviewed so far this session.
    pub cards_reviewed: u32,
    /// Total time spent answering, in seconds.
    pub time_spent_seconds: f64,
    /// Length of the current streak of correct answers.
    pub consecutive_correct: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed review. A wrong answer breaks the streak.
    pub fn record_review(&mut self, correct: bool, response_seconds: f64) {
        self.cards_reviewed += 1;
        self.time_spent_seconds += response_seconds.max(0.0);
        if correct {
            self.consecutive_correct += 1;
        } else {
            self.consecutive_correct = 0;
        }
    }

    /// Mean seconds per card so far. Zero before the first review, so the
    /// value is always well defined.
    pub fn mean_response_seconds(&self) -> f64 {
        if self.cards_reviewed == 0 {
            0.0
        } else {
            self.time_spent_seconds / self.cards_reviewed as f64
        }
    }
}
