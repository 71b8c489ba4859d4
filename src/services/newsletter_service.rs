use std::sync::Arc;

use crate::entities::newsletter_entity as newsletters;
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::external::{AttachmentFetcher, NotificationGateway, OutboundEmail};
use crate::models::*;
use crate::services::SubscriberService;
use crate::utils::mail_templates;
use chrono::Utc;
use futures_util::future::try_join_all;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    Set,
};

pub const MAX_ATTACHMENTS: usize = 5;

#[derive(Clone)]
pub struct NewsletterService {
    pool: DbPool,
    subscriber_service: SubscriberService,
    notifier: Arc<dyn NotificationGateway>,
    fetcher: Arc<dyn AttachmentFetcher>,
    backend_url: String,
}

impl NewsletterService {
    pub fn new(
        pool: DbPool,
        notifier: Arc<dyn NotificationGateway>,
        fetcher: Arc<dyn AttachmentFetcher>,
        backend_url: String,
    ) -> Self {
        let subscriber_service = SubscriberService::new(pool.clone());
        Self {
            pool,
            subscriber_service,
            notifier,
            fetcher,
            backend_url,
        }
    }

    /// Stores the newsletter and mails it to every active subscriber.
    ///
    /// Recipients are processed one at a time; a failed delivery is counted
    /// and the loop moves on. Attachments are fetched up front so a broken
    /// file URL stops the run before anyone is mailed.
    pub async fn send_newsletter(
        &self,
        req: CreateNewsletterRequest,
    ) -> AppResult<NewsletterResponse> {
        let (Some(subject), Some(content)) = (non_blank(req.subject), non_blank(req.content))
        else {
            return Err(AppError::ValidationError(
                "Subject and content are required".to_string(),
            ));
        };
        if req.attachments.len() > MAX_ATTACHMENTS {
            return Err(AppError::ValidationError(format!(
                "At most {MAX_ATTACHMENTS} attachments are allowed"
            )));
        }
        if req
            .attachments
            .iter()
            .any(|a| a.name.trim().is_empty() || a.url.trim().is_empty())
        {
            return Err(AppError::ValidationError(
                "Every attachment needs a name and url".to_string(),
            ));
        }

        let recipients = self.subscriber_service.active_subscribers().await?;
        if recipients.is_empty() {
            return Err(AppError::ValidationError(
                "No active subscribers".to_string(),
            ));
        }

        let now = Utc::now();
        let record = newsletters::ActiveModel {
            subject: Set(subject.clone()),
            content: Set(content.clone()),
            attachments: Set(serde_json::to_value(&req.attachments)?),
            sent_at: Set(None),
            total_recipients: Set(recipients.len() as i32),
            delivered_count: Set(0),
            failed_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        let attachments =
            try_join_all(req.attachments.iter().map(|a| self.fetcher.fetch(a))).await?;

        let mut delivered = 0;
        let mut failed = 0;
        for subscriber in &recipients {
            let unsubscribe =
                mail_templates::unsubscribe_url(&self.backend_url, &subscriber.unsubscribe_token);
            let email = OutboundEmail::new(
                subscriber.email.clone(),
                subject.clone(),
                mail_templates::newsletter_email(&content, &unsubscribe),
            )
            .with_attachments(attachments.clone());

            match self.notifier.send(email).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    failed += 1;
                    log::error!(
                        "Newsletter {} to subscriber {} failed: {e}",
                        record.id,
                        subscriber.id
                    );
                }
            }
        }

        log::info!(
            "Newsletter {} sent: {delivered} delivered, {failed} failed",
            record.id
        );

        let mut am = record.into_active_model();
        am.delivered_count = Set(delivered);
        am.failed_count = Set(failed);
        am.sent_at = Set(Some(Utc::now()));
        am.updated_at = Set(Utc::now());
        let updated = am.update(self.pool.as_ref()).await?;

        Ok(updated.into())
    }

    pub async fn list_newsletters(&self) -> AppResult<Vec<NewsletterResponse>> {
        let list = newsletters::Entity::find()
            .order_by_desc(newsletters::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i64) -> AppResult<newsletters::Model> {
        newsletters::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Newsletter not found".to_string()))
    }

    pub async fn get_newsletter(&self, id: i64) -> AppResult<NewsletterResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn delete_newsletter(&self, id: i64) -> AppResult<()> {
        self.find(id).await?.delete(self.pool.as_ref()).await?;
        log::info!("Newsletter {id} deleted");
        Ok(())
    }
}
