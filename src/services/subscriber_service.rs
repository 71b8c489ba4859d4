use crate::entities::subscriber_entity as subscribers;
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{generate_unsubscribe_token, normalize_email, validate_email};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct SubscriberService {
    pool: DbPool,
}

impl SubscriberService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Adds a newsletter subscriber, reactivating a previously unsubscribed one.
    pub async fn subscribe(&self, req: SubscribeRequest) -> AppResult<SubscriberResponse> {
        let email = non_blank(req.email)
            .map(|e| normalize_email(&e))
            .ok_or_else(|| AppError::ValidationError("Email is required".to_string()))?;
        validate_email(&email)?;

        let existing = subscribers::Entity::find()
            .filter(subscribers::Column::Email.eq(email.as_str()))
            .one(self.pool.as_ref())
            .await?;

        if let Some(subscriber) = existing {
            if subscriber.is_active {
                return Err(AppError::Conflict("Email already subscribed".to_string()));
            }
            let mut am = subscriber.into_active_model();
            am.is_active = Set(true);
            am.updated_at = Set(Utc::now());
            let reactivated = am.update(self.pool.as_ref()).await?;
            log::info!("Subscriber {} reactivated", reactivated.id);
            return Ok(reactivated.into());
        }

        let now = Utc::now();
        let created = subscribers::ActiveModel {
            email: Set(email),
            is_active: Set(true),
            unsubscribe_token: Set(generate_unsubscribe_token()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("New subscriber {}", created.id);
        Ok(created.into())
    }

    pub async fn list_subscribers(&self) -> AppResult<Vec<SubscriberResponse>> {
        let list = subscribers::Entity::find()
            .order_by_desc(subscribers::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Active subscribers with their unsubscribe tokens, for newsletter fan-out.
    pub async fn active_subscribers(&self) -> AppResult<Vec<subscribers::Model>> {
        Ok(subscribers::Entity::find()
            .filter(subscribers::Column::IsActive.eq(true))
            .order_by_asc(subscribers::Column::Id)
            .all(self.pool.as_ref())
            .await?)
    }

    async fn deactivate(&self, subscriber: subscribers::Model) -> AppResult<SubscriberResponse> {
        if !subscriber.is_active {
            return Ok(subscriber.into());
        }
        let mut am = subscriber.into_active_model();
        am.is_active = Set(false);
        am.updated_at = Set(Utc::now());
        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Subscriber {} unsubscribed", updated.id);
        Ok(updated.into())
    }

    pub async fn unsubscribe(&self, id: i64) -> AppResult<SubscriberResponse> {
        let subscriber = subscribers::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Subscriber not found".to_string()))?;
        self.deactivate(subscriber).await
    }

    pub async fn unsubscribe_by_token(&self, token: &str) -> AppResult<SubscriberResponse> {
        let subscriber = subscribers::Entity::find()
            .filter(subscribers::Column::UnsubscribeToken.eq(token))
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid unsubscribe link".to_string()))?;
        self.deactivate(subscriber).await
    }

    pub async fn delete_subscriber(&self, id: i64) -> AppResult<()> {
        let subscriber = subscribers::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Subscriber not found".to_string()))?;
        subscriber.delete(self.pool.as_ref()).await?;
        log::info!("Subscriber {id} deleted");
        Ok(())
    }
}
