//! In-process implementation of the storage seams.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rmf_srs::SchedulingState;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{CardType, LearningCard, ReviewLog},
    store::{CardStore, ReviewLogSink, StoreError},
};

/// Cards and review logs kept in memory.
///
/// Schedule updates compare and bump the card version under the write lock, so only one
/// update computed from a given snapshot is ever applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RwLock<HashMap<Uuid, LearningCard>>,
    logs: RwLock<Vec<ReviewLog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards stored, across all users.
    pub async fn card_count(&self) -> usize {
        self.cards.read().await.len()
    }

    async fn select_oldest_first<F>(&self, keep: F) -> Vec<LearningCard>
    where
        F: Fn(&LearningCard) -> bool,
    {
        let cards = self.cards.read().await;
        let mut selected: Vec<LearningCard> =
            cards.values().filter(|card| keep(card)).cloned().collect();
        selected.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        selected
    }
}

impl CardStore for MemoryStore {
    async fn insert_card(&self, card: LearningCard) -> Result<(), StoreError> {
        let mut cards = self.cards.write().await;
        if cards.contains_key(&card.id) {
            return Err(StoreError::Duplicate(card.id));
        }
        cards.insert(card.id, card);
        Ok(())
    }

    async fn get_card(&self, card_id: Uuid) -> Result<LearningCard, StoreError> {
        self.cards
            .read()
            .await
            .get(&card_id)
            .cloned()
            .ok_or(StoreError::NotFound(card_id))
    }

    async fn update_schedule(
        &self,
        card_id: Uuid,
        expected_version: u64,
        schedule: SchedulingState,
    ) -> Result<LearningCard, StoreError> {
        let mut cards = self.cards.write().await;
        let card = cards
            .get_mut(&card_id)
            .ok_or(StoreError::NotFound(card_id))?;

        if card.version != expected_version {
            return Err(StoreError::Conflict(card_id));
        }

        card.schedule = schedule;
        card.version += 1;
        card.updated_at = schedule.last_review_at;
        Ok(card.clone())
    }

    async fn cards_for_user(&self, user_id: Uuid) -> Result<Vec<LearningCard>, StoreError> {
        Ok(self.select_oldest_first(|card| card.user_id == user_id).await)
    }

    async fn cards_by_type(
        &self,
        user_id: Uuid,
        card_type: CardType,
    ) -> Result<Vec<LearningCard>, StoreError> {
        Ok(self
            .select_oldest_first(|card| card.user_id == user_id && card.card_type == card_type)
            .await)
    }

    async fn due_cards(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<LearningCard>, StoreError> {
        let cards = self.cards.read().await;
        let mut due: Vec<LearningCard> = cards
            .values()
            .filter(|card| card.user_id == user_id && card.is_due(now))
            .cloned()
            .collect();

        due.sort_by(|a, b| {
            a.schedule
                .next_review_at
                .cmp(&b.schedule.next_review_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        due.truncate(limit);
        Ok(due)
    }

    async fn cards_by_difficulty(
        &self,
        user_id: Uuid,
        min: f64,
        max: f64,
    ) -> Result<Vec<LearningCard>, StoreError> {
        let cards = self.cards.read().await;
        let mut matching: Vec<LearningCard> = cards
            .values()
            .filter(|card| {
                card.user_id == user_id
                    && card.schedule.difficulty >= min
                    && card.schedule.difficulty <= max
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            a.schedule
                .difficulty
                .total_cmp(&b.schedule.difficulty)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matching)
    }
}

impl ReviewLogSink for MemoryStore {
    async fn append(&self, log: ReviewLog) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        if logs.iter().any(|existing| existing.id == log.id) {
            return Err(StoreError::Duplicate(log.id));
        }
        logs.push(log);
        Ok(())
    }

    async fn logs_for_card(&self, card_id: Uuid) -> Result<Vec<ReviewLog>, StoreError> {
        Ok(self
            .logs
            .read()
            .await
            .iter()
            .filter(|log| log.card_id == card_id)
            .cloned()
            .collect())
    }
}
