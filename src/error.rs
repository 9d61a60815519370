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

use thiserror::Error;

/// The result type used throughout the crate.
pub type Fallible<T> = Result<T, SchedulerError>;

/// Everything that can go wrong while scheduling a review. All variants are
/// recoverable: an error aborts one review transaction and nothing else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// A recall grade outside the closed range of the selected scale.
    #[error("invalid quality grade {value} (expected a value in 0..={max})")]
    InvalidQuality { value: u8, max: u8 },
    /// A normalized performance score outside `[0, 1]`.
    #[error("invalid performance score {value} (expected a value in [0, 1])")]
    InvalidPerformance { value: f64 },
    /// An input card whose scheduling fields are malformed. The scheduler
    /// never repairs a card; the caller owns the fix.
    #[error("invalid state for card {id}: {reason}")]
    InvalidCardState { id: String, reason: String },
}
