use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rmf_review::{
    MemoryStore, ReviewConfig, ReviewLogSink, ReviewService, StoreError,
    models::{CardType, LearningCard, NewCard, ReviewLog},
};
use rmf_srs::FixedClock;
use uuid::Uuid;

pub type TestService = ReviewService<Arc<MemoryStore>, Arc<MemoryStore>, Arc<FixedClock>>;

/// Fixed starting instant for every test
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
}

/// A service over a fresh in-memory store with a stopped clock
pub struct TestHarness {
    pub service: TestService,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(ReviewConfig::default())
    }

    pub fn with_config(config: ReviewConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(t0()));
        let service = ReviewService::new(store.clone(), store.clone(), clock.clone(), config);
        Self {
            service,
            store,
            clock,
        }
    }

    /// Create a text card with a unique title for `user_id`
    pub async fn create_card(&self, user_id: Uuid) -> anyhow::Result<LearningCard> {
        let card = self
            .service
            .create_card(NewCard {
                user_id,
                title: format!("Card {}", Uuid::new_v4()),
                content: "Some content".to_string(),
                card_type: CardType::Text,
            })
            .await?;
        Ok(card)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A review log sink that rejects everything
#[derive(Debug, Default)]
pub struct RejectingSink;

impl ReviewLogSink for RejectingSink {
    async fn append(&self, log: ReviewLog) -> Result<(), StoreError> {
        Err(StoreError::Duplicate(log.id))
    }

    async fn logs_for_card(&self, _card_id: Uuid) -> Result<Vec<ReviewLog>, StoreError> {
        Ok(Vec::new())
    }
}
