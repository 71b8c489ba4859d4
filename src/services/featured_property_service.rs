use crate::database::DbPool;
use crate::entities::featured_property_entity as featured_properties;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::slugify;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

fn check_price(price: f64) -> AppResult<f64> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(AppError::ValidationError(
            "Price must be a non-negative number".to_string(),
        ))
    }
}

fn clean_slug(raw: &str) -> AppResult<String> {
    let slug = slugify(raw);
    if slug.is_empty() {
        return Err(AppError::ValidationError(
            "Slug must contain letters or digits".to_string(),
        ));
    }
    Ok(slug)
}

/// Homepage highlight cards; separate from the full property listings.
#[derive(Clone)]
pub struct FeaturedPropertyService {
    pool: DbPool,
}

impl FeaturedPropertyService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn slug_taken(&self, slug: &str) -> AppResult<bool> {
        Ok(featured_properties::Entity::find()
            .filter(featured_properties::Column::Slug.eq(slug))
            .one(self.pool.as_ref())
            .await?
            .is_some())
    }

    async fn find(&self, id: i64) -> AppResult<featured_properties::Model> {
        featured_properties::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Featured property not found".to_string()))
    }

    pub async fn create(
        &self,
        req: CreateFeaturedPropertyRequest,
    ) -> AppResult<FeaturedPropertyResponse> {
        let (Some(title), Some(slug), Some(location), Some(price)) = (
            non_blank(req.title),
            non_blank(req.slug),
            non_blank(req.location),
            req.price,
        ) else {
            return Err(AppError::ValidationError(
                "Title, slug, location and price are required".to_string(),
            ));
        };
        let image = non_blank(req.image)
            .ok_or_else(|| AppError::ValidationError("Property image is required".to_string()))?;
        let price = check_price(price)?;
        let slug = clean_slug(&slug)?;

        if self.slug_taken(&slug).await? {
            return Err(AppError::Conflict("Slug already exists".to_string()));
        }

        let now = Utc::now();
        let created = featured_properties::ActiveModel {
            title: Set(title),
            slug: Set(slug),
            location: Set(location),
            price: Set(price),
            image: Set(image),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Featured property {} created", created.slug);
        Ok(created.into())
    }

    pub async fn list_active(&self) -> AppResult<Vec<FeaturedPropertyResponse>> {
        let list = featured_properties::Entity::find()
            .filter(featured_properties::Column::IsActive.eq(true))
            .order_by_desc(featured_properties::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Inactive entries are hidden from public lookups.
    pub async fn get_active(&self, slug: &str) -> AppResult<FeaturedPropertyResponse> {
        featured_properties::Entity::find()
            .filter(featured_properties::Column::Slug.eq(slug))
            .filter(featured_properties::Column::IsActive.eq(true))
            .one(self.pool.as_ref())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Featured property not found".to_string()))
    }

    pub async fn update(
        &self,
        id: i64,
        req: UpdateFeaturedPropertyRequest,
    ) -> AppResult<FeaturedPropertyResponse> {
        let price = req.price.map(check_price).transpose()?;
        let existing = self.find(id).await?;
        let current_slug = existing.slug.clone();
        let mut am = existing.into_active_model();

        if let Some(slug) = non_blank(req.slug) {
            let slug = clean_slug(&slug)?;
            if slug != current_slug && self.slug_taken(&slug).await? {
                return Err(AppError::Conflict("Slug already exists".to_string()));
            }
            am.slug = Set(slug);
        }
        if let Some(title) = non_blank(req.title) {
            am.title = Set(title);
        }
        if let Some(location) = non_blank(req.location) {
            am.location = Set(location);
        }
        if let Some(price) = price {
            am.price = Set(price);
        }
        if let Some(image) = non_blank(req.image) {
            am.image = Set(image);
        }
        if let Some(is_active) = req.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Utc::now());

        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Featured property {id} updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find(id).await?.delete(self.pool.as_ref()).await?;
        log::info!("Featured property {id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn featured(id: i64, slug: &str, price: f64) -> featured_properties::Model {
        let now = Utc::now();
        featured_properties::Model {
            id,
            title: "Lakeside Villas".into(),
            slug: slug.into(),
            location: "Hinjewadi, Pune".into(),
            price,
            image: "https://files.test/lakeside.jpg".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn request() -> CreateFeaturedPropertyRequest {
        CreateFeaturedPropertyRequest {
            title: Some("Lakeside Villas".into()),
            slug: Some("lakeside-villas".into()),
            location: Some("Hinjewadi, Pune".into()),
            price: Some(12_500_000.0),
            image: Some("https://files.test/lakeside.jpg".into()),
        }
    }

    #[tokio::test]
    async fn test_create_featured_property() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<featured_properties::Model>::new(),
                vec![featured(1, "lakeside-villas", 12_500_000.0)],
            ])
            .into_connection();
        let created = FeaturedPropertyService::new(Arc::new(db))
            .create(request())
            .await
            .unwrap();
        assert_eq!(created.slug, "lakeside-villas");
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = FeaturedPropertyService::new(Arc::new(db));
        for broken in [
            CreateFeaturedPropertyRequest { price: None, ..request() },
            CreateFeaturedPropertyRequest { location: Some(" ".into()), ..request() },
            CreateFeaturedPropertyRequest { image: None, ..request() },
            CreateFeaturedPropertyRequest { price: Some(-1.0), ..request() },
            CreateFeaturedPropertyRequest { slug: Some("???".into()), ..request() },
        ] {
            let err = service.create(broken).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![featured(1, "lakeside-villas", 1.0)]])
            .into_connection();
        let err = FeaturedPropertyService::new(Arc::new(db))
            .create(request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_inactive_slug_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<featured_properties::Model>::new()])
            .into_connection();
        let err = FeaturedPropertyService::new(Arc::new(db))
            .get_active("hidden")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_price() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![featured(1, "lakeside-villas", 1.0)],
                vec![featured(1, "lakeside-villas", 2.0)],
            ])
            .into_connection();
        let updated = FeaturedPropertyService::new(Arc::new(db))
            .update(
                1,
                UpdateFeaturedPropertyRequest {
                    price: Some(2.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 2.0);
    }

    #[tokio::test]
    async fn test_update_to_taken_slug_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![featured(1, "lakeside-villas", 1.0)],
                vec![featured(2, "hill-crest", 1.0)],
            ])
            .into_connection();
        let err = FeaturedPropertyService::new(Arc::new(db))
            .update(
                1,
                UpdateFeaturedPropertyRequest {
                    slug: Some("Hill Crest".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<featured_properties::Model>::new()])
            .into_connection();
        let err = FeaturedPropertyService::new(Arc::new(db))
            .delete(9)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_featured_property() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![featured(1, "lakeside-villas", 1.0)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        assert!(FeaturedPropertyService::new(Arc::new(db)).delete(1).await.is_ok());
    }
}
