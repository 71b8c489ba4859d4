use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};

use crate::database::DbPool;
use crate::entities::lead_entity as leads;
use crate::error::AppResult;
use crate::models::LeadPayload;

/// Name stored when the visitor left it blank.
pub const DEFAULT_LEAD_NAME: &str = "Customer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub payload: LeadPayload,
    pub is_verified: bool,
}

impl NewLead {
    pub fn verified(payload: LeadPayload) -> Self {
        Self {
            payload,
            is_verified: true,
        }
    }

    pub fn name(&self) -> &str {
        self.payload.name.as_deref().unwrap_or(DEFAULT_LEAD_NAME)
    }
}

/// Durable lead storage used by the verification flow.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, lead: NewLead) -> AppResult<leads::Model>;
}

#[derive(Clone)]
pub struct PgLeadRepository {
    pool: DbPool,
}

impl PgLeadRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn create(&self, lead: NewLead) -> AppResult<leads::Model> {
        let now = Utc::now();
        let name = lead.name().to_string();
        let payload = lead.payload;

        let model = leads::ActiveModel {
            name: Set(name),
            phone: Set(payload.phone),
            email: Set(payload.email),
            purpose: Set(payload.purpose),
            requirements: Set(payload.requirements),
            budget: Set(payload.budget),
            message: Set(payload.message),
            marked: Set(false),
            is_verified: Set(lead.is_verified),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn payload() -> LeadPayload {
        LeadPayload {
            name: None,
            email: Some("a@example.com".into()),
            phone: "9990001111".into(),
            purpose: "Buy".into(),
            requirements: "2BHK".into(),
            budget: None,
            message: None,
        }
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(NewLead::verified(payload()).name(), DEFAULT_LEAD_NAME);
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let now = Utc::now();
        let stored = leads::Model {
            id: 7,
            name: DEFAULT_LEAD_NAME.into(),
            phone: "9990001111".into(),
            email: Some("a@example.com".into()),
            purpose: "Buy".into(),
            requirements: "2BHK".into(),
            budget: None,
            message: None,
            marked: false,
            is_verified: true,
            created_at: now,
            updated_at: now,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let repo = PgLeadRepository::new(Arc::new(db));
        let created = repo.create(NewLead::verified(payload())).await.unwrap();
        assert_eq!(created, stored);
    }
}
