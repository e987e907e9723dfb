//! Review workflow: create cards, evaluate review submissions, list due cards.

use metrics::counter;
use rmf_srs::{Clock, SystemClock, advance};
use uuid::Uuid;

use crate::{
    config::ReviewConfig,
    error::ReviewError,
    models::{CardType, LearningCard, NewCard, ReviewLog, ReviewOutcome, ReviewSubmission},
    store::{CardStore, ReviewLogSink},
    validation::{validate_difficulty_range, validate_title},
};

#[derive(Debug)]
pub struct ReviewService<S, L, C = SystemClock> {
    store: S,
    log_sink: L,
    clock: C,
    config: ReviewConfig,
}

impl<S, L, C> ReviewService<S, L, C>
where
    S: CardStore,
    L: ReviewLogSink,
    C: Clock,
{
    pub const fn new(store: S, log_sink: L, clock: C, config: ReviewConfig) -> Self {
        Self {
            store,
            log_sink,
            clock,
            config,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn log_sink(&self) -> &L {
        &self.log_sink
    }

    pub const fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Create a card, due for its first review one day from now.
    pub async fn create_card(&self, new: NewCard) -> Result<LearningCard, ReviewError> {
        validate_title(&new.title)?;

        let card = LearningCard::new(new, self.clock.now());
        self.store.insert_card(card.clone()).await?;

        counter!("cards_created_total").increment(1);
        tracing::info!(card_id = %card.id, user_id = %card.user_id, "Learning card created");

        Ok(card)
    }

    /// Evaluate a review of `card_id` and persist the card's next schedule.
    ///
    /// The review log entry is best effort: if the sink rejects it the review still
    /// counts and the outcome carries no `log_id`.
    pub async fn submit_review(
        &self,
        card_id: Uuid,
        submission: ReviewSubmission,
    ) -> Result<ReviewOutcome, ReviewError> {
        let quality = submission.assessment().resolve()?;
        let card = self.store.get_card(card_id).await?;

        let now = self.clock.now();
        let schedule = advance(&card.schedule, quality, now)?;

        let card = self
            .store
            .update_schedule(card_id, card.version, schedule)
            .await?;

        counter!("reviews_total", "quality" => quality.to_string()).increment(1);
        tracing::debug!(
            card_id = %card_id,
            quality = quality.value(),
            review_count = schedule.review_count,
            difficulty = schedule.difficulty,
            next_review_at = %schedule.next_review_at,
            "Review evaluated"
        );

        let log = ReviewLog::new(&card, quality, submission.duration_secs(), now);
        let log_id = log.id;
        let log_id = match self.log_sink.append(log).await {
            Ok(()) => Some(log_id),
            Err(e) => {
                tracing::warn!(card_id = %card_id, "Failed to record review log: {}", e);
                None
            }
        };

        Ok(ReviewOutcome {
            card,
            quality,
            log_id,
        })
    }

    /// All cards of `user_id`, oldest first.
    pub async fn cards_for_user(&self, user_id: Uuid) -> Result<Vec<LearningCard>, ReviewError> {
        let cards = self.store.cards_for_user(user_id).await?;
        Ok(cards)
    }

    /// Cards of `user_id` holding the given kind of content, oldest first.
    pub async fn cards_by_type(
        &self,
        user_id: Uuid,
        card_type: CardType,
    ) -> Result<Vec<LearningCard>, ReviewError> {
        let cards = self.store.cards_by_type(user_id, card_type).await?;
        Ok(cards)
    }

    /// Cards of `user_id` due for review now, earliest first.
    pub async fn due_cards(&self, user_id: Uuid) -> Result<Vec<LearningCard>, ReviewError> {
        let cards = self
            .store
            .due_cards(user_id, self.clock.now(), self.config.due_batch_limit)
            .await?;
        Ok(cards)
    }

    /// Cards of `user_id` whose difficulty lies in `[min, max]`.
    pub async fn cards_by_difficulty(
        &self,
        user_id: Uuid,
        min: f64,
        max: f64,
    ) -> Result<Vec<LearningCard>, ReviewError> {
        validate_difficulty_range(min, max)?;
        let cards = self.store.cards_by_difficulty(user_id, min, max).await?;
        Ok(cards)
    }
}
