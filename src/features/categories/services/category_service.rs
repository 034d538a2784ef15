use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::categories::dtos::{
    CategoryQuery, CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::CategoryWithCount;
use crate::shared::forms::{merge_text, non_blank};
use crate::shared::slug::slug_for_submission;

const SELECT_WITH_COUNT: &str = r#"
    SELECT c.id, c.name, c.slug, c.description, c.icon, c.color, c.created_at, c.updated_at,
           (SELECT COUNT(*) FROM courses co WHERE co.category_id = c.id) AS course_count
    FROM categories c
"#;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated index, ordered by name
    pub async fn list(&self, query: &CategoryQuery) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let pagination = query.pagination();
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM categories c");
        push_search(&mut count_qb, search);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_WITH_COUNT);
        push_search(&mut qb, search);
        qb.push(" ORDER BY c.name, c.id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<CategoryWithCount> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Get category by id
    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let query = format!("{} WHERE c.id = $1", SELECT_WITH_COUNT);
        let row: Option<CategoryWithCount> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        row.map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let query = format!("{} WHERE c.slug = $1", SELECT_WITH_COUNT);
        let row: Option<CategoryWithCount> = sqlx::query_as(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by slug: {:?}", e);
                AppError::Database(e)
            })?;

        row.map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Create a category, deriving the slug from the name when none is given
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let name = dto.name.trim().to_string();
        let slug = slug_for_submission(None, &name, dto.slug.as_deref());
        if slug.is_empty() {
            return Err(AppError::field(
                "slug",
                "could not be derived from the name; enter one manually",
            ));
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name, slug, description, icon, color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&name)
        .bind(&slug)
        .bind(non_blank(dto.description))
        .bind(non_blank(dto.icon))
        .bind(non_blank(dto.color))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::info!("Category {} created with slug '{}'", id, slug);
        self.get(id).await
    }

    /// Partial update. The slug keeps following the name unless it was customised.
    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let current = self.get(id).await?;

        let name = dto
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| current.name.clone());
        let slug = slug_for_submission(
            Some((current.name.as_str(), current.slug.as_str())),
            &name,
            dto.slug.as_deref(),
        );
        if slug.is_empty() {
            return Err(AppError::field(
                "slug",
                "could not be derived from the name; enter one manually",
            ));
        }

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $1, slug = $2, description = $3, icon = $4, color = $5, updated_at = NOW()
            WHERE id = $6
            "#,
        )
        .bind(&name)
        .bind(&slug)
        .bind(merge_text(current.description, dto.description))
        .bind(merge_text(current.icon, dto.icon))
        .bind(merge_text(current.color, dto.color))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category with id {} not found", id)));
        }

        self.get(id).await
    }

    /// Delete a category. Its courses stay, uncategorized.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category with id {} not found", id)));
        }

        tracing::info!("Category {} deleted", id);
        Ok(())
    }
}

fn push_search(qb: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    if let Some(term) = search {
        let pattern = format!("%{}%", term);
        qb.push(" WHERE (c.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.slug ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_create_derives_slug_and_update_follows_name(pool: PgPool) {
        let service = CategoryService::new(pool);
        let created = service
            .create(CreateCategoryDto {
                name: "Web Development!!".to_string(),
                slug: None,
                description: None,
                icon: None,
                color: Some("#123456".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.slug, "web-development");
        assert_eq!(created.course_count, 0);

        let renamed = service
            .update(
                created.id,
                UpdateCategoryDto {
                    name: Some("Web Design".to_string()),
                    slug: Some("web-development".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.slug, "web-design");
        assert_eq!(renamed.color.as_deref(), Some("#123456"));

        let duplicate = service
            .create(CreateCategoryDto {
                name: "Web Design".to_string(),
                slug: None,
                description: None,
                icon: None,
                color: None,
            })
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }
}
