use crate::entities::property_entity as properties;
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::slugify;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::json;

#[derive(Clone)]
pub struct PropertyService {
    pool: DbPool,
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn is_wildcard(value: &str) -> bool {
    value.trim().is_empty() || value.trim().eq_ignore_ascii_case("all")
}

/// `villa-plot` in a URL means the `villa plot` type.
fn type_term(raw: Option<&str>) -> Option<String> {
    raw.filter(|t| !is_wildcard(t))
        .map(|t| t.trim().replace('-', " "))
}

fn location_terms(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(l) if !is_wildcard(l) => l
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn ilike(column: properties::Column, term: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(like_pattern(term))
}

fn build_filter(query: &PropertyQuery) -> Condition {
    let mut cond = Condition::all();

    if let Some(t) = type_term(query.property_type.as_deref()) {
        cond = cond.add(ilike(properties::Column::PropertyType, &t));
    }

    let locations = location_terms(query.location.as_deref());
    if !locations.is_empty() {
        let any = locations
            .iter()
            .fold(Condition::any(), |acc, l| {
                acc.add(ilike(properties::Column::Location, l))
            });
        cond = cond.add(any);
    }

    if let Some(p) = non_blank(query.purpose.clone()) {
        cond = cond.add(ilike(properties::Column::Purpose, &p));
    }

    cond
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl PropertyService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<properties::Model>> {
        Ok(properties::Entity::find()
            .filter(properties::Column::Slug.eq(slug))
            .one(self.pool.as_ref())
            .await?)
    }

    async fn get(&self, slug: &str) -> AppResult<properties::Model> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Property not found".to_string()))
    }

    pub async fn create_property(&self, req: CreatePropertyRequest) -> AppResult<PropertyResponse> {
        let title = non_blank(req.title);
        let location = non_blank(req.location);
        let (Some(title), Some(purpose), Some(location)) = (title, req.purpose, location) else {
            return Err(AppError::ValidationError(
                "Title, purpose and location are required".to_string(),
            ));
        };

        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(AppError::ValidationError(
                "Title must contain letters or digits".to_string(),
            ));
        }
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A property with slug '{slug}' already exists"
            )));
        }

        let now = Utc::now();
        let created = properties::ActiveModel {
            title: Set(title),
            slug: Set(slug),
            description: Set(text(req.description)),
            property_type: Set(text(req.property_type)),
            purpose: Set(purpose.to_string()),
            location: Set(location),
            brochure: Set(text(req.brochure)),
            builder: Set(text(req.builder)),
            images: Set(json!(req.images)),
            price: Set(req.price),
            bedrooms: Set(text(req.bedrooms)),
            bathrooms: Set(text(req.bathrooms)),
            area_sqft: Set(text(req.area_sqft)),
            highlights: Set(json!(req.highlights)),
            features_amenities: Set(json!(req.features_amenities)),
            nearby: Set(json!(req.nearby)),
            google_map_url: Set(text(req.google_map_url)),
            video_link: Set(text(req.video_link)),
            meta_title: Set(text(req.meta_title)),
            meta_description: Set(text(req.meta_description)),
            created_at: Set(now),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Property {} created", created.slug);
        Ok(created.into())
    }

    pub async fn list_properties(
        &self,
        query: &PropertyQuery,
    ) -> AppResult<PaginatedResponse<PropertyResponse>> {
        let params = PaginationParams::new(query.page, query.limit);
        let base_query = properties::Entity::find().filter(build_filter(query));

        let total = base_query.clone().count(self.pool.as_ref()).await? as i64;

        let items = base_query
            .order_by_desc(properties::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(self.pool.as_ref())
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    pub async fn get_property(&self, slug: &str) -> AppResult<PropertyResponse> {
        Ok(self.get(slug).await?.into())
    }

    pub async fn update_property(
        &self,
        slug: &str,
        req: UpdatePropertyRequest,
    ) -> AppResult<PropertyResponse> {
        let property = self.get(slug).await?;
        let mut images = match req.existing_images {
            Some(kept) => kept,
            None => string_list(&property.images),
        };
        if let Some(added) = req.images {
            images.extend(added);
        }

        let current_slug = property.slug.clone();
        let mut am = property.into_active_model();

        if let Some(title) = non_blank(req.title) {
            let new_slug = slugify(&title);
            if new_slug.is_empty() {
                return Err(AppError::ValidationError(
                    "Title must contain letters or digits".to_string(),
                ));
            }
            if new_slug != current_slug && self.find_by_slug(&new_slug).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "A property with slug '{new_slug}' already exists"
                )));
            }
            am.title = Set(title);
            am.slug = Set(new_slug);
        }
        if let Some(v) = req.description {
            am.description = Set(v.trim().to_string());
        }
        if let Some(v) = req.property_type {
            am.property_type = Set(v.trim().to_string());
        }
        if let Some(v) = req.purpose {
            am.purpose = Set(v.to_string());
        }
        if let Some(v) = non_blank(req.location) {
            am.location = Set(v);
        }
        if let Some(v) = req.price {
            am.price = Set(Some(v));
        }
        if let Some(v) = req.bedrooms {
            am.bedrooms = Set(v);
        }
        if let Some(v) = req.bathrooms {
            am.bathrooms = Set(v);
        }
        if let Some(v) = req.area_sqft {
            am.area_sqft = Set(v);
        }
        if let Some(v) = req.highlights {
            am.highlights = Set(json!(v));
        }
        if let Some(v) = req.features_amenities {
            am.features_amenities = Set(json!(v));
        }
        if let Some(v) = req.nearby {
            am.nearby = Set(json!(v));
        }
        if let Some(v) = req.google_map_url {
            am.google_map_url = Set(v);
        }
        if let Some(v) = req.video_link {
            am.video_link = Set(v);
        }
        if let Some(v) = req.brochure {
            am.brochure = Set(v);
        }
        if let Some(v) = req.builder {
            am.builder = Set(v);
        }
        if let Some(v) = req.meta_title {
            am.meta_title = Set(v);
        }
        if let Some(v) = req.meta_description {
            am.meta_description = Set(v);
        }
        am.images = Set(json!(images));
        am.last_updated = Set(Utc::now());

        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Property {current_slug} updated");
        Ok(updated.into())
    }

    pub async fn delete_property(&self, slug: &str) -> AppResult<()> {
        self.get(slug).await?.delete(self.pool.as_ref()).await?;
        log::info!("Property {slug} deleted");
        Ok(())
    }
}
