use chrono::{DateTime, Utc};
use rmf_srs::{Assessment, Attempt, Quality, SchedulingState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of content a card holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Text,
    Image,
}

/// Learning card model - a study card owned by a user, with its review schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCard {
    /// Unique card identifier
    pub id: Uuid,
    /// Owner of the card
    pub user_id: Uuid,
    /// Card title (max 255 chars)
    pub title: String,
    /// Card body
    pub content: String,
    /// Kind of content, queried through `cards_by_type`
    pub card_type: CardType,
    /// Review count, difficulty, last and next review dates
    #[serde(flatten)]
    pub schedule: SchedulingState,
    /// Bumped by the store on every schedule update, used to detect concurrent reviews
    #[serde(default)]
    pub version: u64,
    /// When the card was created
    pub created_at: DateTime<Utc>,
    /// When the card was last updated
    pub updated_at: DateTime<Utc>,
}

impl LearningCard {
    /// Build a reviewable card from its creation request.
    pub fn new(new: NewCard, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title.trim().to_string(),
            content: new.content,
            card_type: new.card_type,
            schedule: SchedulingState::new(now),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the card should be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.schedule.is_due(now)
    }
}

/// Fields supplied by the user when creating a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub card_type: CardType,
}

/// Review log model - one evaluated attempt at a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLog {
    /// Unique log entry identifier
    pub id: Uuid,
    pub card_id: Uuid,
    pub user_id: Uuid,
    /// When the attempt was evaluated
    pub reviewed_at: DateTime<Utc>,
    /// Grade given to the attempt
    pub quality: Quality,
    /// Time spent on the attempt, in seconds
    pub duration_secs: u32,
}

impl ReviewLog {
    /// Log entry for an attempt at `card`, with a fresh id.
    pub fn new(
        card: &LearningCard,
        quality: Quality,
        duration_secs: u32,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id: card.id,
            user_id: card.user_id,
            reviewed_at,
            quality,
            duration_secs,
        }
    }
}

/// A review submitted for a card
///
/// A graded review carries the time spent separately. An attempt is graded from its own
/// duration, which is also the one recorded in the review log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSubmission {
    /// The user graded the review themselves
    Graded {
        /// Raw grade, validated when the review is evaluated
        quality: i32,
        /// Time spent on the attempt, in seconds
        duration_secs: u32,
    },
    /// Grade the review from how the attempt went
    Attempt(Attempt),
}

impl ReviewSubmission {
    /// A review the user graded themselves.
    pub const fn graded(quality: i32, duration_secs: u32) -> Self {
        Self::Graded {
            quality,
            duration_secs,
        }
    }

    /// A review graded from how the attempt went.
    pub fn attempt(duration_secs: i64, correct: bool, marked_hard: bool) -> Self {
        Self::Attempt(Attempt::from_secs(duration_secs, correct, marked_hard))
    }

    /// How the quality of the review is obtained.
    pub const fn assessment(&self) -> Assessment {
        match *self {
            Self::Graded { quality, .. } => Assessment::Explicit(quality),
            Self::Attempt(attempt) => Assessment::Inferred(attempt),
        }
    }

    /// Time spent on the attempt in whole seconds, as recorded in the review log.
    pub fn duration_secs(&self) -> u32 {
        match *self {
            Self::Graded { duration_secs, .. } => duration_secs,
            Self::Attempt(attempt) => {
                u32::try_from(attempt.duration.num_seconds().max(0)).unwrap_or(u32::MAX)
            }
        }
    }
}

/// Result of a review submission
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    /// The card with its updated schedule
    pub card: LearningCard,
    /// The grade the review was scheduled with
    pub quality: Quality,
    /// The review log entry, `None` if it could not be recorded
    pub log_id: Option<Uuid>,
}
