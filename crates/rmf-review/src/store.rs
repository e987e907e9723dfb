//! Storage seams of the review workflow.
//!
//! The scheduler never touches storage itself: a [`CardStore`] hands out snapshots of a
//! card's schedule and persists the updated one, a [`ReviewLogSink`] records each
//! evaluated attempt.

use std::{future::Future, sync::Arc};

use chrono::{DateTime, Utc};
use rmf_srs::SchedulingState;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CardType, LearningCard, ReviewLog};

/// Errors reported by a [`CardStore`] or a [`ReviewLogSink`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No card with this id
    #[error("Card not found: {0}")]
    NotFound(Uuid),
    /// The card changed since the snapshot the update was computed from
    #[error("Card {0} was reviewed concurrently")]
    Conflict(Uuid),
    /// A card or log entry with this id already exists
    #[error("Record already exists: {0}")]
    Duplicate(Uuid),
}

/// Persisted learning cards.
pub trait CardStore: Send + Sync {
    /// Store a new card.
    fn insert_card(&self, card: LearningCard) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Snapshot of a card, including its schedule and version.
    fn get_card(&self, card_id: Uuid)
    -> impl Future<Output = Result<LearningCard, StoreError>> + Send;

    /// Replace the schedule of a card and return the updated card.
    ///
    /// Implementations must apply the update only if the stored `version` still equals
    /// `expected_version`, increment the version when they do, and report
    /// [`StoreError::Conflict`] otherwise. At most one update computed from a given
    /// snapshot is ever persisted.
    fn update_schedule(
        &self,
        card_id: Uuid,
        expected_version: u64,
        schedule: SchedulingState,
    ) -> impl Future<Output = Result<LearningCard, StoreError>> + Send;

    /// All cards of `user_id`, oldest first.
    fn cards_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send;

    /// Cards of `user_id` of the given type, oldest first.
    fn cards_by_type(
        &self,
        user_id: Uuid,
        card_type: CardType,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send;

    /// Cards of `user_id` with `next_review_at <= now`, earliest first, at most `limit`.
    fn due_cards(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send;

    /// Cards of `user_id` whose difficulty lies in `[min, max]`, easiest first.
    fn cards_by_difficulty(
        &self,
        user_id: Uuid,
        min: f64,
        max: f64,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send;
}

/// Destination of review log entries.
pub trait ReviewLogSink: Send + Sync {
    /// Record one evaluated attempt.
    fn append(&self, log: ReviewLog) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Entries recorded for a card, oldest first.
    fn logs_for_card(
        &self,
        card_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ReviewLog>, StoreError>> + Send;
}

impl<T: CardStore> CardStore for Arc<T> {
    fn insert_card(&self, card: LearningCard) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).insert_card(card)
    }

    fn get_card(
        &self,
        card_id: Uuid,
    ) -> impl Future<Output = Result<LearningCard, StoreError>> + Send {
        (**self).get_card(card_id)
    }

    fn update_schedule(
        &self,
        card_id: Uuid,
        expected_version: u64,
        schedule: SchedulingState,
    ) -> impl Future<Output = Result<LearningCard, StoreError>> + Send {
        (**self).update_schedule(card_id, expected_version, schedule)
    }

    fn cards_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send {
        (**self).cards_for_user(user_id)
    }

    fn cards_by_type(
        &self,
        user_id: Uuid,
        card_type: CardType,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send {
        (**self).cards_by_type(user_id, card_type)
    }

    fn due_cards(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send {
        (**self).due_cards(user_id, now, limit)
    }

    fn cards_by_difficulty(
        &self,
        user_id: Uuid,
        min: f64,
        max: f64,
    ) -> impl Future<Output = Result<Vec<LearningCard>, StoreError>> + Send {
        (**self).cards_by_difficulty(user_id, min, max)
    }
}

impl<T: ReviewLogSink> ReviewLogSink for Arc<T> {
    fn append(&self, log: ReviewLog) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).append(log)
    }

    fn logs_for_card(
        &self,
        card_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ReviewLog>, StoreError>> + Send {
        (**self).logs_for_card(card_id)
    }
}
