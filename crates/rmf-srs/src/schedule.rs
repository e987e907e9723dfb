//! Scheduling state of a card and the transition applied after each review.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::SrsError, quality::Quality};

/// Difficulty given to a card that has never been reviewed.
pub const INITIAL_DIFFICULTY: f64 = 0.3;
/// Lower bound of the difficulty of a reviewed card.
pub const MIN_DIFFICULTY: f64 = 0.8;
/// Upper bound of the difficulty of any card.
pub const MAX_DIFFICULTY: f64 = 5.0;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// The scheduling fields of a learning card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulingState {
    /// Consecutive successful review cycles, reset to 1 on a failed attempt
    pub review_count: u32,
    /// How hard the card is to retain, multiplies the interval once the card has graduated
    pub difficulty: f64,
    /// When the card was last reviewed
    pub last_review_at: DateTime<Utc>,
    /// When the card becomes due
    pub next_review_at: DateTime<Utc>,
}

impl SchedulingState {
    /// Scheduling state of a newly created card: due one day after `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            review_count: 0,
            difficulty: INITIAL_DIFFICULTY,
            last_review_at: now,
            next_review_at: now + Duration::days(1),
        }
    }

    /// Whether the card should be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Time between the last review and the next one.
    pub fn interval(&self) -> Duration {
        self.next_review_at - self.last_review_at
    }

    /// Check the state against the invariants maintained by [`advance`].
    ///
    /// A card that was never reviewed may still carry [`INITIAL_DIFFICULTY`], which sits
    /// below [`MIN_DIFFICULTY`]. Anything else out of range is reported, never repaired.
    pub fn validate(&self) -> Result<(), SrsError> {
        let floor = if self.review_count == 0 {
            INITIAL_DIFFICULTY
        } else {
            MIN_DIFFICULTY
        };

        if !self.difficulty.is_finite() || self.difficulty < floor || self.difficulty > MAX_DIFFICULTY
        {
            return Err(SrsError::CorruptState(format!(
                "difficulty {} outside [{}, {}] for review count {}",
                self.difficulty, floor, MAX_DIFFICULTY, self.review_count
            )));
        }

        if self.next_review_at < self.last_review_at {
            return Err(SrsError::CorruptState(format!(
                "next review {} precedes last review {}",
                self.next_review_at, self.last_review_at
            )));
        }

        Ok(())
    }
}

/// Advance a card's scheduling state after a review graded `quality` at `now`.
///
/// # Algorithm
///
/// The difficulty is updated and clamped to `[0.8, 5.0]` on every call:
///
/// `difficulty' = difficulty + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`
///
/// The interval then depends on the outcome:
///
/// * Quality below 3: review count resets to 1, next review in 1 day
/// * First success: 1 day
/// * Second success: 6 days, whatever the difficulty
/// * Later successes: `review_count * difficulty` days, kept to the microsecond
///
/// # Errors
///
/// * [`SrsError::CorruptState`] if `state` breaks its invariants (see [`SchedulingState::validate`])
/// * [`SrsError::ScheduleOverflow`] if the next review falls outside the representable range
pub fn advance(
    state: &SchedulingState,
    quality: Quality,
    now: DateTime<Utc>,
) -> Result<SchedulingState, SrsError> {
    state.validate()?;

    let difficulty = next_difficulty(state.difficulty, quality);

    let (review_count, interval) = if quality.is_failure() {
        (1, Duration::days(1))
    } else {
        let review_count = state.review_count.saturating_add(1);
        let interval = match review_count {
            1 => Duration::days(1),
            2 => Duration::days(6),
            n => scaled_interval(n, difficulty),
        };
        (review_count, interval)
    };

    let next_review_at = now
        .checked_add_signed(interval)
        .ok_or(SrsError::ScheduleOverflow)?;

    Ok(SchedulingState {
        review_count,
        difficulty,
        last_review_at: now,
        next_review_at,
    })
}

fn next_difficulty(difficulty: f64, quality: Quality) -> f64 {
    let lapse = f64::from(5 - quality.value());
    let updated = difficulty + (0.1 - lapse * (0.08 + lapse * 0.02));
    updated.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

fn scaled_interval(review_count: u32, difficulty: f64) -> Duration {
    let days = f64::from(review_count) * difficulty;
    // `as` saturates, an oversized interval surfaces as an overflow on the add
    Duration::microseconds((days * MICROS_PER_DAY).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn state(review_count: u32, difficulty: f64) -> SchedulingState {
        SchedulingState {
            review_count,
            difficulty,
            last_review_at: t0(),
            next_review_at: t0() + Duration::days(1),
        }
    }

    #[test]
    fn test_new_state_defaults() {
        let fresh = SchedulingState::new(t0());
        assert_eq!(fresh.review_count, 0);
        assert_eq!(fresh.difficulty, INITIAL_DIFFICULTY);
        assert_eq!(fresh.last_review_at, t0());
        assert_eq!(fresh.interval(), Duration::hours(24));
        assert!(fresh.validate().is_ok());
    }

    #[test]
    fn test_next_difficulty_curve() {
        let base = 2.5;
        let deltas: Vec<f64> = Quality::ALL
            .iter()
            .map(|q| next_difficulty(base, *q) - base)
            .collect();

        let expected = [-0.8, -0.54, -0.32, -0.14, 0.0, 0.1];
        for (delta, want) in deltas.iter().zip(expected) {
            assert!((delta - want).abs() < 1e-9, "got {delta}, want {want}");
        }
    }

    #[test]
    fn test_difficulty_stays_clamped() {
        let mut current = SchedulingState::new(t0());
        for i in 0..50 {
            current = advance(&current, Quality::Perfect, t0() + Duration::days(i)).unwrap();
            assert!(current.difficulty <= MAX_DIFFICULTY);
            assert!(current.difficulty >= MIN_DIFFICULTY);
        }
        assert_eq!(current.difficulty, MAX_DIFFICULTY);

        for i in 0..50 {
            current = advance(&current, Quality::Blackout, t0() + Duration::days(i)).unwrap();
            assert!(current.difficulty >= MIN_DIFFICULTY);
        }
        assert_eq!(current.difficulty, MIN_DIFFICULTY);
    }

    #[test]
    fn test_failure_resets_progress() {
        for quality in [Quality::Blackout, Quality::WrongFamiliar, Quality::Wrong] {
            let next = advance(&state(7, 3.0), quality, t0()).unwrap();
            assert_eq!(next.review_count, 1);
            assert_eq!(next.interval(), Duration::hours(24));
            assert!(next.difficulty < 3.0);
        }
    }

    #[test]
    fn test_graduation_steps() {
        for difficulty in [INITIAL_DIFFICULTY, 1.7, MAX_DIFFICULTY] {
            let first = advance(&state(0, difficulty), Quality::Hard, t0()).unwrap();
            assert_eq!(first.review_count, 1);
            assert_eq!(first.interval(), Duration::hours(24));

            let later = t0() + Duration::days(1);
            let second = advance(&first, Quality::Hard, later).unwrap();
            assert_eq!(second.review_count, 2);
            assert_eq!(second.last_review_at, later);
            assert_eq!(second.interval(), Duration::days(6));
        }
    }

    #[test]
    fn test_scaled_interval_keeps_fractional_days() {
        // 3 * 1.7 = 5.1 days
        let next = advance(&state(2, 1.7), Quality::Hesitant, t0()).unwrap();
        assert_eq!(next.review_count, 3);
        let expected = Duration::microseconds((3.0 * next.difficulty * MICROS_PER_DAY).round() as i64);
        assert_eq!(next.interval(), expected);
        assert!(next.interval() > Duration::days(5));
        assert!(next.interval() < Duration::days(6));
    }

    #[test]
    fn test_interval_grows_with_review_count() {
        // Difficulty pinned at the ceiling by perfect recall
        let mut previous = Duration::zero();
        for review_count in 2..12 {
            let next = advance(&state(review_count, MAX_DIFFICULTY), Quality::Perfect, t0()).unwrap();
            assert_eq!(next.difficulty, MAX_DIFFICULTY);
            assert!(next.interval() > previous);
            previous = next.interval();
        }
        assert_eq!(previous, Duration::days(60));
    }

    #[test]
    fn test_advance_is_deterministic() {
        let input = state(4, 2.2);
        let a = advance(&input, Quality::Hesitant, t0()).unwrap();
        let b = advance(&input, Quality::Hesitant, t0()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.difficulty.to_bits(), b.difficulty.to_bits());
        // Input untouched
        assert_eq!(input, state(4, 2.2));
    }

    #[test]
    fn test_new_card_first_perfect_review() {
        let created = SchedulingState::new(t0());
        let reviewed_at = t0() + Duration::hours(30);
        let quality = crate::infer_quality(Duration::seconds(6), true, false).unwrap();
        assert_eq!(quality, Quality::Perfect);

        let next = advance(&created, quality, reviewed_at).unwrap();
        assert_eq!(next.review_count, 1);
        assert_eq!(next.last_review_at, reviewed_at);
        assert_eq!(next.next_review_at, reviewed_at + Duration::hours(24));
        // 0.3 + 0.1 is raised to the floor
        assert_eq!(next.difficulty, MIN_DIFFICULTY);
    }

    #[test]
    fn test_corrupt_state_is_rejected() {
        let too_easy = state(3, 0.5);
        assert!(matches!(
            advance(&too_easy, Quality::Perfect, t0()),
            Err(SrsError::CorruptState(_))
        ));

        let too_hard = state(0, 5.5);
        assert!(matches!(
            advance(&too_hard, Quality::Perfect, t0()),
            Err(SrsError::CorruptState(_))
        ));

        let not_a_number = state(2, f64::NAN);
        assert!(not_a_number.validate().is_err());

        let mut backwards = state(2, 2.0);
        backwards.next_review_at = t0() - Duration::hours(1);
        assert!(matches!(
            backwards.validate(),
            Err(SrsError::CorruptState(_))
        ));

        // Below the floor is fine only before the first review
        assert!(state(0, INITIAL_DIFFICULTY).validate().is_ok());
        assert!(state(1, INITIAL_DIFFICULTY).validate().is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::days(2);
        assert_eq!(
            advance(&state(5, 4.0), Quality::Perfect, near_end),
            Err(SrsError::ScheduleOverflow)
        );
    }

    #[test]
    fn test_is_due() {
        let fresh = SchedulingState::new(t0());
        assert!(!fresh.is_due(t0()));
        assert!(fresh.is_due(t0() + Duration::hours(24)));
        assert!(fresh.is_due(t0() + Duration::days(3)));
    }
}
