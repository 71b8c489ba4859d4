use crate::entities::lead_entity as leads;
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{normalize_email, validate_email};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    Set,
};

/// Admin-side management of stored leads.
#[derive(Clone)]
pub struct LeadService {
    pool: DbPool,
}

impl LeadService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_leads(&self) -> AppResult<Vec<LeadResponse>> {
        let list = leads::Entity::find()
            .order_by_desc(leads::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i64) -> AppResult<leads::Model> {
        leads::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
    }

    pub async fn update_lead(&self, id: i64, req: UpdateLeadRequest) -> AppResult<LeadResponse> {
        let lead = self.find(id).await?;
        let mut am = lead.into_active_model();

        if let Some(name) = non_blank(req.name) {
            am.name = Set(name);
        }
        if let Some(email) = req.email {
            // an explicit empty string clears the address
            let email = non_blank(Some(email)).map(|e| normalize_email(&e));
            if let Some(e) = &email {
                validate_email(e)?;
            }
            am.email = Set(email);
        }
        if let Some(purpose) = non_blank(req.purpose) {
            am.purpose = Set(purpose);
        }
        if let Some(requirements) = non_blank(req.requirements) {
            am.requirements = Set(requirements);
        }
        if let Some(budget) = req.budget {
            am.budget = Set(non_blank(Some(budget)));
        }
        if let Some(message) = req.message {
            am.message = Set(non_blank(Some(message)));
        }
        if let Some(marked) = req.marked {
            am.marked = Set(marked);
        }
        if let Some(is_verified) = req.is_verified {
            am.is_verified = Set(is_verified);
        }
        am.updated_at = Set(Utc::now());

        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Lead {id} updated");
        Ok(updated.into())
    }

    pub async fn delete_lead(&self, id: i64) -> AppResult<()> {
        let lead = self.find(id).await?;
        lead.delete(self.pool.as_ref()).await?;
        log::info!("Lead {id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn lead(id: i64, marked: bool) -> leads::Model {
        let now = Utc::now();
        leads::Model {
            id,
            name: "A".into(),
            phone: "9990001111".into(),
            email: None,
            purpose: "Buy".into(),
            requirements: "2BHK".into(),
            budget: None,
            message: None,
            marked,
            is_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_leads() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lead(2, false), lead(1, true)]])
            .into_connection();
        let list = LeadService::new(Arc::new(db)).list_leads().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 2);
    }

    #[tokio::test]
    async fn test_mark_lead() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lead(1, false)], vec![lead(1, true)]])
            .into_connection();
        let updated = LeadService::new(Arc::new(db))
            .update_lead(
                1,
                UpdateLeadRequest {
                    marked: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.marked);
    }

    #[tokio::test]
    async fn test_update_missing_lead_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<leads::Model>::new()])
            .into_connection();
        let err = LeadService::new(Arc::new(db))
            .update_lead(42, UpdateLeadRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_lead() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lead(1, false)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        assert!(LeadService::new(Arc::new(db)).delete_lead(1).await.is_ok());
    }
}
