//! Review quality grades and the rules that infer them from a raw attempt.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::SrsError;

/// Below this, a wrong answer means the card was not recalled at all.
const BLACKOUT_THRESHOLD_SECS: i64 = 5;
/// Below this, a correct answer counts as instant recall.
const PERFECT_THRESHOLD_SECS: i64 = 10;

/// How well a card was recalled in one attempt, from 0 (worst) to 5 (best).
///
/// Grades 0-2 are failures and reset the card's progress, grades 3-5 are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i32")]
#[repr(u8)]
pub enum Quality {
    /// Forgot completely
    Blackout = 0,
    /// Wrong, but with a slight recollection
    WrongFamiliar = 1,
    /// Wrong
    Wrong = 2,
    /// Correct, but hard
    Hard = 3,
    /// Correct after some hesitation
    Hesitant = 4,
    /// Perfect recall
    Perfect = 5,
}

impl Quality {
    /// All grades, ordered from worst to best.
    pub const ALL: [Self; 6] = [
        Self::Blackout,
        Self::WrongFamiliar,
        Self::Wrong,
        Self::Hard,
        Self::Hesitant,
        Self::Perfect,
    ];

    /// The numeric grade, 0-5.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Whether this grade counts as a failed attempt (below 3).
    pub const fn is_failure(self) -> bool {
        (self as u8) < 3
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

impl TryFrom<i32> for Quality {
    type Error = SrsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Blackout),
            1 => Ok(Self::WrongFamiliar),
            2 => Ok(Self::Wrong),
            3 => Ok(Self::Hard),
            4 => Ok(Self::Hesitant),
            5 => Ok(Self::Perfect),
            other => Err(SrsError::InvalidQuality(other)),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Classify an attempt into a quality grade.
///
/// The first matching rule wins:
///
/// * Wrong in under 5s: [`Quality::Blackout`]
/// * Wrong and marked hard: [`Quality::WrongFamiliar`]
/// * Wrong: [`Quality::Wrong`]
/// * Correct and marked hard: [`Quality::Hard`]
/// * Correct in under 10s: [`Quality::Perfect`]
/// * Correct: [`Quality::Hesitant`]
///
/// # Errors
///
/// Returns [`SrsError::InvalidDuration`] if `duration` is zero or negative.
///
/// # Examples
/// ```
/// use chrono::Duration;
/// use rmf_srs::{Quality, infer_quality};
///
/// let quality = infer_quality(Duration::seconds(7), true, false).unwrap();
/// assert_eq!(quality, Quality::Perfect);
/// ```
pub fn infer_quality(
    duration: Duration,
    correct: bool,
    marked_hard: bool,
) -> Result<Quality, SrsError> {
    if duration <= Duration::zero() {
        return Err(SrsError::InvalidDuration(duration));
    }

    let quality = if !correct {
        if duration < Duration::seconds(BLACKOUT_THRESHOLD_SECS) {
            Quality::Blackout
        } else if marked_hard {
            Quality::WrongFamiliar
        } else {
            Quality::Wrong
        }
    } else if marked_hard {
        Quality::Hard
    } else if duration < Duration::seconds(PERFECT_THRESHOLD_SECS) {
        Quality::Perfect
    } else {
        Quality::Hesitant
    };

    Ok(quality)
}

/// The raw signals of one attempt at a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// Time spent on the attempt
    pub duration: Duration,
    /// Whether the answer was correct
    pub correct: bool,
    /// Whether the user flagged the card as hard
    pub marked_hard: bool,
}

impl Attempt {
    /// Build an attempt from a duration in whole seconds.
    ///
    /// Out-of-range values saturate. Non-positive ones are kept so that
    /// [`Assessment::resolve`] can reject them.
    pub fn from_secs(secs: i64, correct: bool, marked_hard: bool) -> Self {
        let duration = Duration::try_seconds(secs).unwrap_or(if secs < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        });
        Self {
            duration,
            correct,
            marked_hard,
        }
    }
}

/// How the quality of an attempt is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    /// The caller already graded the attempt. The raw grade is validated on resolve.
    Explicit(i32),
    /// Grade the attempt from its raw signals
    Inferred(Attempt),
}

impl Assessment {
    /// Resolve the assessment into a validated quality grade.
    ///
    /// # Errors
    ///
    /// * [`SrsError::InvalidQuality`] for an explicit grade outside 0-5. It is never clamped.
    /// * [`SrsError::InvalidDuration`] for an inferred attempt with a non-positive duration.
    pub fn resolve(&self) -> Result<Quality, SrsError> {
        match *self {
            Self::Explicit(quality) => Quality::try_from(quality),
            Self::Inferred(attempt) => {
                infer_quality(attempt.duration, attempt.correct, attempt.marked_hard)
            }
        }
    }
}
