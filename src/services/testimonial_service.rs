use crate::entities::testimonial_entity as testimonials;
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

pub const DEFAULT_DESIGNATION: &str = "Verified Client";
pub const PUBLIC_LIST_LIMIT: u64 = 10;

fn check_rating(rating: i16) -> AppResult<i16> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(AppError::ValidationError(
            "Rating must be between 1 and 5".to_string(),
        ))
    }
}

#[derive(Clone)]
pub struct TestimonialService {
    pool: DbPool,
}

impl TestimonialService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create_testimonial(
        &self,
        req: CreateTestimonialRequest,
    ) -> AppResult<TestimonialResponse> {
        let (Some(name), Some(message)) = (non_blank(req.name), non_blank(req.message)) else {
            return Err(AppError::ValidationError(
                "Name and message are required".to_string(),
            ));
        };
        let rating = check_rating(req.rating.unwrap_or(5))?;

        let now = Utc::now();
        let created = testimonials::ActiveModel {
            name: Set(name),
            message: Set(message),
            image: Set(non_blank(req.image)),
            designation: Set(
                non_blank(req.designation).unwrap_or_else(|| DEFAULT_DESIGNATION.to_string())
            ),
            rating: Set(rating),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Testimonial {} created", created.id);
        Ok(created.into())
    }

    pub async fn list_testimonials(&self) -> AppResult<Vec<TestimonialResponse>> {
        let list = testimonials::Entity::find()
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Latest active testimonials for the public site.
    pub async fn list_public(&self) -> AppResult<Vec<TestimonialResponse>> {
        let list = testimonials::Entity::find()
            .filter(testimonials::Column::IsActive.eq(true))
            .order_by_desc(testimonials::Column::CreatedAt)
            .limit(PUBLIC_LIST_LIMIT)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i64) -> AppResult<testimonials::Model> {
        testimonials::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))
    }

    pub async fn update_testimonial(
        &self,
        id: i64,
        req: UpdateTestimonialRequest,
    ) -> AppResult<TestimonialResponse> {
        let rating = req.rating.map(check_rating).transpose()?;
        let mut am = self.find(id).await?.into_active_model();

        if let Some(name) = non_blank(req.name) {
            am.name = Set(name);
        }
        if let Some(message) = non_blank(req.message) {
            am.message = Set(message);
        }
        if let Some(designation) = non_blank(req.designation) {
            am.designation = Set(designation);
        }
        if let Some(rating) = rating {
            am.rating = Set(rating);
        }
        if let Some(is_active) = req.is_active {
            am.is_active = Set(is_active);
        }
        if let Some(image) = req.image {
            am.image = Set(non_blank(Some(image)));
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete_testimonial(&self, id: i64) -> AppResult<()> {
        self.find(id).await?.delete(self.pool.as_ref()).await?;
        log::info!("Testimonial {id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn testimonial(rating: i16, designation: &str) -> testimonials::Model {
        let now = Utc::now();
        testimonials::Model {
            id: 1,
            name: "Rahul".into(),
            message: "Great service".into(),
            image: None,
            designation: designation.into(),
            rating,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_with_defaults() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![testimonial(5, DEFAULT_DESIGNATION)]])
            .into_connection();
        let created = TestimonialService::new(Arc::new(db))
            .create_testimonial(CreateTestimonialRequest {
                name: Some("Rahul".into()),
                message: Some("Great service".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.rating, 5);
        assert_eq!(created.designation, DEFAULT_DESIGNATION);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = TestimonialService::new(Arc::new(db));
        for rating in [0, 6, -1] {
            let err = service
                .create_testimonial(CreateTestimonialRequest {
                    name: Some("Rahul".into()),
                    message: Some("Great service".into()),
                    rating: Some(rating),
                    ..Default::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }

        let err = service
            .update_testimonial(
                1,
                UpdateTestimonialRequest {
                    rating: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_missing_message() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = TestimonialService::new(Arc::new(db))
            .create_testimonial(CreateTestimonialRequest {
                name: Some("Rahul".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_rating() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![testimonial(5, DEFAULT_DESIGNATION)],
                vec![testimonial(3, DEFAULT_DESIGNATION)],
            ])
            .into_connection();
        let updated = TestimonialService::new(Arc::new(db))
            .update_testimonial(
                1,
                UpdateTestimonialRequest {
                    rating: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.rating, 3);
    }
}
