use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::newsletter_entity as newsletters;

/// A file already uploaded to storage, referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttachmentRef {
    #[schema(example = "Oaklyn-Brochure.pdf")]
    pub name: String,
    #[schema(example = "https://res.cloudinary.com/demo/raw/upload/Oaklyn/brochures/brochure.pdf")]
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "application/pdf")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateNewsletterRequest {
    #[schema(example = "New launches this month")]
    pub subject: Option<String>,
    #[schema(example = "<p>Three new projects in Whitefield...</p>")]
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsletterResponse {
    pub id: i64,
    pub subject: String,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
    pub sent_at: Option<DateTime<Utc>>,
    pub total_recipients: i32,
    pub delivered_count: i32,
    pub failed_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<newsletters::Model> for NewsletterResponse {
    fn from(n: newsletters::Model) -> Self {
        // Rows are only written by this service, so a malformed list is treated as empty
        let attachments = serde_json::from_value(n.attachments).unwrap_or_default();
        Self {
            id: n.id,
            subject: n.subject,
            content: n.content,
            attachments,
            sent_at: n.sent_at,
            total_recipients: n.total_recipients,
            delivered_count: n.delivered_count,
            failed_count: n.failed_count,
            created_at: n.created_at,
        }
    }
}
