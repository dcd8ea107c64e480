//! Record CRUD over one backend service
//!
//! Stamps timestamps, validates ids and runs batch deletes sequentially on
//! top of whichever [`BackendService`] it was constructed with.

use std::sync::Arc;

use chrono::Utc;
use larder_provider::{BackendService, Food, ProviderKind, Record, RecordKind, Subscription};

use crate::error::{BatchFailure, CoreError, CoreResult, ValidationFailure};
use crate::services::ServiceContext;

/// Record operations bound to one backend service
pub struct CrudManager {
    service: Arc<dyn BackendService>,
}

impl CrudManager {
    /// Wrap an existing service instance
    #[must_use]
    pub fn new(service: Arc<dyn BackendService>) -> Self {
        Self { service }
    }

    /// Build a manager on a fresh service for the active configuration
    pub async fn for_current_config(ctx: &ServiceContext) -> CoreResult<Self> {
        Ok(Self::new(ctx.create_service_for_current_config().await?))
    }

    /// The wrapped service
    pub fn service(&self) -> &Arc<dyn BackendService> {
        &self.service
    }

    pub fn service_name(&self) -> &'static str {
        self.service.service_name()
    }

    pub fn service_kind(&self) -> ProviderKind {
        self.service.service_kind()
    }

    pub async fn test_connection(&self) -> bool {
        self.service.test_connection().await
    }

    // ===== Food =====

    pub async fn get_all_foods(&self) -> CoreResult<Vec<Food>> {
        Ok(self.service.get_all_foods().await?)
    }

    /// Stamp both timestamps and create the food
    pub async fn create_food(&self, mut food: Food) -> CoreResult<Food> {
        stamp_created(&mut food);
        let created = self.service.create_food(&food).await?;
        log::info!("Created food '{}' ({})", created.food_name, created.id);
        Ok(created)
    }

    /// Update the food stored under `id`; the argument id wins over `food.id`
    pub async fn update_food(&self, id: &str, mut food: Food) -> CoreResult<Food> {
        require_id(id)?;
        stamp_updated(&mut food, id);
        Ok(self.service.update_food(id, &food).await?)
    }

    pub async fn delete_food(&self, id: &str) -> CoreResult<bool> {
        require_id(id)?;
        Ok(self.service.delete_food(id).await?)
    }

    /// Delete foods one at a time, returning the number deleted
    pub async fn delete_multiple_foods(&self, ids: &[String]) -> CoreResult<usize> {
        self.delete_many(RecordKind::Food, ids).await
    }

    // ===== Subscription =====

    pub async fn get_all_subscriptions(&self) -> CoreResult<Vec<Subscription>> {
        Ok(self.service.get_all_subscriptions().await?)
    }

    /// Stamp both timestamps and create the subscription
    pub async fn create_subscription(
        &self,
        mut subscription: Subscription,
    ) -> CoreResult<Subscription> {
        stamp_created(&mut subscription);
        let created = self.service.create_subscription(&subscription).await?;
        log::info!("Created subscription '{}' ({})", created.name, created.id);
        Ok(created)
    }

    /// Update the subscription stored under `id`; the argument id wins
    pub async fn update_subscription(
        &self,
        id: &str,
        mut subscription: Subscription,
    ) -> CoreResult<Subscription> {
        require_id(id)?;
        stamp_updated(&mut subscription, id);
        Ok(self.service.update_subscription(id, &subscription).await?)
    }

    pub async fn delete_subscription(&self, id: &str) -> CoreResult<bool> {
        require_id(id)?;
        Ok(self.service.delete_subscription(id).await?)
    }

    /// Delete subscriptions one at a time, returning the number deleted
    pub async fn delete_multiple_subscriptions(&self, ids: &[String]) -> CoreResult<usize> {
        self.delete_many(RecordKind::Subscription, ids).await
    }

    // ===== Validation =====

    /// Check a food before it is sent anywhere. No I/O.
    pub fn validate_food(food: Option<&Food>) -> CoreResult<bool> {
        let food = food.ok_or(ValidationFailure::NullRecord)?;
        require_name(food)?;
        Ok(true)
    }

    /// Check a subscription before it is sent anywhere. No I/O.
    pub fn validate_subscription(subscription: Option<&Subscription>) -> CoreResult<bool> {
        let subscription = subscription.ok_or(ValidationFailure::NullRecord)?;
        require_name(subscription)?;
        if subscription.price < 0.0 {
            return Err(ValidationFailure::NegativePrice.into());
        }
        Ok(true)
    }

    async fn delete_one(&self, kind: RecordKind, id: &str) -> CoreResult<bool> {
        match kind {
            RecordKind::Food => self.delete_food(id).await,
            RecordKind::Subscription => self.delete_subscription(id).await,
        }
    }

    // Sequential, no rollback: ids deleted before a failure stay deleted.
    async fn delete_many(&self, kind: RecordKind, ids: &[String]) -> CoreResult<usize> {
        if ids.is_empty() {
            return Err(ValidationFailure::EmptyIdList.into());
        }

        let mut succeeded = 0;
        let mut failures = Vec::new();

        for id in ids {
            match self.delete_one(kind, id).await {
                Ok(true) => succeeded += 1,
                Ok(false) => failures.push(BatchFailure {
                    item: id.clone(),
                    reason: format!("{kind} was not deleted"),
                }),
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("Failed to delete {kind} {id}: {e}");
                    } else {
                        log::error!("Failed to delete {kind} {id}: {e}");
                    }
                    failures.push(BatchFailure {
                        item: id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            log::info!("Deleted {succeeded} {kind} records");
            return Ok(succeeded);
        }

        Err(CoreError::PartialBatchFailure {
            succeeded,
            failed: failures.len(),
            failures,
        })
    }
}

fn require_id(id: &str) -> CoreResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationFailure::MissingId.into());
    }
    Ok(())
}

fn require_name<R: Record>(record: &R) -> CoreResult<()> {
    if record.name().trim().is_empty() {
        return Err(ValidationFailure::EmptyName.into());
    }
    Ok(())
}

fn stamp_created<R: Record>(record: &mut R) {
    let now = Utc::now();
    record.set_created_at(now);
    record.set_updated_at(now);
}

fn stamp_updated<R: Record>(record: &mut R, id: &str) {
    record.set_updated_at(Utc::now());
    record.set_id(id.to_string());
}
