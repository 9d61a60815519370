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

use crate::error::Fallible;
use crate::error::SchedulerError;

/// A recall grade on the four-point scale shared by the standard and
/// enhanced SM-2 schedulers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    /// No recall.
    Again = 0,
    /// Recalled with serious difficulty.
    Hard = 1,
    /// Recalled correctly.
    Good = 2,
    /// Recalled without effort.
    Easy = 3,
}

impl Quality {
    /// Parse a raw grade. Out-of-range values are rejected, never coerced.
    pub fn from_value(value: u8) -> Fallible<Self> {
        match value {
            0 => Ok(Quality::Again),
            1 => Ok(Quality::Hard),
            2 => Ok(Quality::Good),
            3 => Ok(Quality::Easy),
            _ => Err(SchedulerError::InvalidQuality { value, max: 3 }),
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// An answer counts as correct at `Good` or better.
    pub fn is_correct(self) -> bool {
        self >= Quality::Good
    }
}

impl TryFrom<u8> for Quality {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Fallible<Self> {
        Quality::from_value(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

/// A recall grade on the classic six-value SM-2 scale (0 through 5), used by
/// the [`crate::sm2::Sm2FivePoint`] strategy. Deliberately a distinct type
/// from [`Quality`]: the two scales are not numerically equivalent at shared
/// grade labels and must never be mixed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FivePointQuality {
    /// Complete blackout, no recall.
    Blackout = 0,
    /// Incorrect, but the answer was remembered once seen.
    Incorrect = 1,
    /// Incorrect, but the answer seemed easy to recall.
    IncorrectEasy = 2,
    /// Correct with serious difficulty.
    CorrectHard = 3,
    /// Correct after hesitation.
    CorrectHesitant = 4,
    /// Perfect response.
    Perfect = 5,
}

impl FivePointQuality {
    pub fn from_value(value: u8) -> Fallible<Self> {
        match value {
            0 => Ok(FivePointQuality::Blackout),
            1 => Ok(FivePointQuality::Incorrect),
            2 => Ok(FivePointQuality::IncorrectEasy),
            3 => Ok(FivePointQuality::CorrectHard),
            4 => Ok(FivePointQuality::CorrectHesitant),
            5 => Ok(FivePointQuality::Perfect),
            _ => Err(SchedulerError::InvalidQuality { value, max: 5 }),
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_correct(self) -> bool {
        self >= FivePointQuality::CorrectHard
    }
}

impl TryFrom<u8> for FivePointQuality {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Fallible<Self> {
        FivePointQuality::from_value(value)
    }
}

impl From<FivePointQuality> for u8 {
    fn from(quality: FivePointQuality) -> Self {
        quality.value()
    }
}

/// A normalized recall score in `[0, 1]`, consumed by the Leitner scheduler.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Performance(f64);

impl Performance {
    /// The score at or above which an answer counts as correct.
    pub const CORRECT_THRESHOLD: f64 = 0.8;

    pub fn new(value: f64) -> Fallible<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SchedulerError::InvalidPerformance { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_correct(self) -> bool {
        self.0 >= Self::CORRECT_THRESHOLD
    }
}

impl TryFrom<f64> for Performance {
    type Error = SchedulerError;

    fn try_from(value: f64) -> Fallible<Self> {
        Performance::new(value)
    }
}

impl From<Performance> for f64 {
    fn from(performance: Performance) -> Self {
        performance.value()
    }
}

/// The fixed grade-to-performance mapping used when a Leitner deck is driven
/// by the four-point scale. `Good` lands exactly on the correctness
/// threshold.
impl From<Quality> for Performance {
    fn from(quality: Quality) -> Self {
        match quality {
            Quality::Again => Performance(0.0),
            Quality::Hard => Performance(0.5),
            Quality::Good => Performance(Performance::CORRECT_THRESHOLD),
            Quality::Easy => Performance(1.0),
        }
    }
}
