use crate::database::DbPool;
use crate::entities::blog_entity as blogs;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::slugify;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde_json::json;

pub const RELATED_LIMIT: usize = 4;

#[derive(Clone)]
pub struct BlogService {
    pool: DbPool,
}

fn cover_url(value: Option<String>) -> AppResult<String> {
    non_blank(value).ok_or_else(|| AppError::ValidationError("Cover image is required".to_string()))
}

/// Posts sharing a tag with `tags`, newest first; the newest posts overall
/// when nothing overlaps. `others` must already be ordered newest first.
fn pick_related(tags: &[String], others: Vec<blogs::Model>) -> Vec<blogs::Model> {
    let sharing: Vec<_> = others
        .iter()
        .filter(|b| string_list(&b.tags).iter().any(|t| tags.contains(t)))
        .take(RELATED_LIMIT)
        .cloned()
        .collect();
    if sharing.is_empty() {
        others.into_iter().take(RELATED_LIMIT).collect()
    } else {
        sharing
    }
}

impl BlogService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<blogs::Model>> {
        Ok(blogs::Entity::find()
            .filter(blogs::Column::Slug.eq(slug))
            .one(self.pool.as_ref())
            .await?)
    }

    async fn get(&self, slug: &str) -> AppResult<blogs::Model> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))
    }

    pub async fn create_blog(&self, req: CreateBlogRequest) -> AppResult<BlogResponse> {
        let (Some(title), Some(slug), Some(excerpt), Some(content), Some(author)) = (
            non_blank(req.title),
            non_blank(req.slug),
            non_blank(req.excerpt),
            non_blank(req.content),
            non_blank(req.author),
        ) else {
            return Err(AppError::ValidationError(
                "Title, slug, excerpt, content and author are required".to_string(),
            ));
        };
        let cover_image = cover_url(req.cover_image)?;

        let slug = slugify(&slug);
        if slug.is_empty() {
            return Err(AppError::ValidationError(
                "Slug must contain letters or digits".to_string(),
            ));
        }
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A blog post with slug '{slug}' already exists"
            )));
        }

        let alt = non_blank(req.cover_image_alt).unwrap_or_else(|| title.clone());
        let tags = req.tags.as_deref().map(parse_tags).unwrap_or_default();

        let now = Utc::now();
        let created = blogs::ActiveModel {
            title: Set(title),
            slug: Set(slug),
            excerpt: Set(excerpt),
            content: Set(content),
            author: Set(author),
            tags: Set(json!(tags)),
            cover_image: Set(cover_image),
            cover_image_alt: Set(alt),
            date_published: Set(now),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Blog post {} created", created.slug);
        Ok(created.into())
    }

    pub async fn list_blogs(&self) -> AppResult<Vec<BlogResponse>> {
        let list = blogs::Entity::find()
            .order_by_desc(blogs::Column::DatePublished)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn update_blog(&self, slug: &str, req: UpdateBlogRequest) -> AppResult<BlogResponse> {
        let mut am = self.get(slug).await?.into_active_model();

        if let Some(title) = non_blank(req.title) {
            am.title = Set(title);
        }
        if let Some(excerpt) = non_blank(req.excerpt) {
            am.excerpt = Set(excerpt);
        }
        if let Some(content) = non_blank(req.content) {
            am.content = Set(content);
        }
        if let Some(author) = non_blank(req.author) {
            am.author = Set(author);
        }
        if let Some(tags) = non_blank(req.tags) {
            am.tags = Set(json!(parse_tags(&tags)));
        }
        if let Some(cover_image) = non_blank(req.cover_image) {
            am.cover_image = Set(cover_image);
        }
        if let Some(alt) = non_blank(req.cover_image_alt) {
            am.cover_image_alt = Set(alt);
        }
        am.last_updated = Set(Utc::now());

        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Blog post {slug} updated");
        Ok(updated.into())
    }

    pub async fn update_cover_image(
        &self,
        slug: &str,
        req: UpdateCoverImageRequest,
    ) -> AppResult<BlogResponse> {
        let cover_image = cover_url(req.cover_image)?;
        let mut am = self.get(slug).await?.into_active_model();
        am.cover_image = Set(cover_image);
        am.last_updated = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete_blog(&self, slug: &str) -> AppResult<()> {
        self.get(slug).await?.delete(self.pool.as_ref()).await?;
        log::info!("Blog post {slug} deleted");
        Ok(())
    }

    /// Up to four other posts for the "read next" strip.
    pub async fn related_blogs(&self, slug: &str) -> AppResult<Vec<BlogResponse>> {
        let current = self.get(slug).await?;
        let others = blogs::Entity::find()
            .filter(blogs::Column::Slug.ne(slug))
            .order_by_desc(blogs::Column::DatePublished)
            .all(self.pool.as_ref())
            .await?;

        let related = pick_related(&string_list(&current.tags), others);
        Ok(related.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn post(id: i64, slug: &str, tags: &[&str]) -> blogs::Model {
        let now = Utc::now();
        blogs::Model {
            id,
            title: "First Home Guide".into(),
            slug: slug.into(),
            excerpt: "What to check".into(),
            content: "<p>Body</p>".into(),
            author: "Editorial".into(),
            tags: json!(tags),
            cover_image: "https://files.test/cover.jpg".into(),
            cover_image_alt: "First Home Guide".into(),
            date_published: now,
            last_updated: now,
        }
    }

    fn request() -> CreateBlogRequest {
        CreateBlogRequest {
            title: Some("First Home Guide".into()),
            slug: Some("First Home Guide".into()),
            excerpt: Some("What to check".into()),
            content: Some("<p>Body</p>".into()),
            author: Some("Editorial".into()),
            tags: Some("pune, loans".into()),
            cover_image: Some("https://files.test/cover.jpg".into()),
            cover_image_alt: None,
        }
    }

    #[test]
    fn test_pick_related_prefers_shared_tags() {
        let others = vec![
            post(2, "b", &["rent"]),
            post(3, "c", &["pune"]),
            post(4, "d", &["loans", "pune"]),
        ];
        let related = pick_related(&["pune".to_string()], others);
        let slugs: Vec<_> = related.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, ["c", "d"]);
    }

    #[test]
    fn test_pick_related_falls_back_to_newest() {
        let others: Vec<_> = (2..8).map(|i| post(i, &format!("p{i}"), &["rent"])).collect();
        let related = pick_related(&["pune".to_string()], others.clone());
        assert_eq!(related, others[..RELATED_LIMIT].to_vec());

        let untagged = pick_related(&[], others.clone());
        assert_eq!(untagged.len(), RELATED_LIMIT);
    }

    #[tokio::test]
    async fn test_create_blog_slugifies_and_defaults_alt() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<blogs::Model>::new(),
                vec![post(1, "first-home-guide", &["pune", "loans"])],
            ])
            .into_connection();
        let created = BlogService::new(Arc::new(db))
            .create_blog(request())
            .await
            .unwrap();
        assert_eq!(created.slug, "first-home-guide");
        assert_eq!(created.tags, vec!["pune", "loans"]);
        assert_eq!(created.cover_image_alt, "First Home Guide");
    }

    #[tokio::test]
    async fn test_create_blog_requires_fields_and_cover() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = BlogService::new(Arc::new(db));
        for broken in [
            CreateBlogRequest { author: Some(" ".into()), ..request() },
            CreateBlogRequest { excerpt: None, ..request() },
            CreateBlogRequest { cover_image: None, ..request() },
        ] {
            let err = service.create_blog(broken).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post(1, "first-home-guide", &[])]])
            .into_connection();
        let err = BlogService::new(Arc::new(db))
            .create_blog(request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_blog_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<blogs::Model>::new()])
            .into_connection();
        let err = BlogService::new(Arc::new(db))
            .update_blog("nope", UpdateBlogRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cover_image_update_requires_url() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = BlogService::new(Arc::new(db))
            .update_cover_image("first-home-guide", UpdateCoverImageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_related_for_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<blogs::Model>::new()])
            .into_connection();
        let err = BlogService::new(Arc::new(db))
            .related_blogs("nope")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_related_excludes_current_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![post(1, "a", &["pune"])],
                vec![post(2, "b", &["rent"]), post(3, "c", &["pune"])],
            ])
            .into_connection();
        let related = BlogService::new(Arc::new(db))
            .related_blogs("a")
            .await
            .unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "c");
    }

    #[tokio::test]
    async fn test_delete_blog() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post(1, "a", &[])]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        assert!(BlogService::new(Arc::new(db)).delete_blog("a").await.is_ok());
    }
}
