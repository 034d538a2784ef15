use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::courses::dtos::{
    CourseQuery, CourseResponseDto, CreateCourseDto, UpdateCourseDto,
};
use crate::features::courses::models::CourseRow;
use crate::shared::forms::{merge_ref, merge_text, non_blank};
use crate::shared::slug::slug_for_submission;

const SELECT_COURSE: &str = r#"
    SELECT co.id, co.title, co.slug, co.description, co.category_id, co.instructor_id,
           co.price, co.level, co.is_published, co.created_at, co.updated_at,
           cat.name AS category_name, cat.slug AS category_slug, cat.color AS category_color,
           u.name AS instructor_name, u.email AS instructor_email,
           (SELECT COUNT(*) FROM lessons l WHERE l.course_id = co.id) AS lesson_count,
           (SELECT COUNT(*) FROM enrollments e
             WHERE e.course_id = co.id AND e.deleted_at IS NULL) AS enrollment_count
    FROM courses co
    LEFT JOIN categories cat ON cat.id = co.category_id
    LEFT JOIN users u ON u.id = co.instructor_id
"#;

/// Service for course operations
pub struct CourseService {
    pool: PgPool,
}

impl CourseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated index, newest first
    pub async fn list(&self, query: &CourseQuery) -> Result<(Vec<CourseResponseDto>, i64)> {
        let pagination = query.pagination();

        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM courses co");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count courses: {:?}", e);
                AppError::Database(e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COURSE);
        push_filters(&mut qb, query);
        qb.push(" ORDER BY co.created_at DESC, co.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<CourseRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list courses: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn find(&self, id: i64) -> Result<CourseRow> {
        let query = format!("{} WHERE co.id = $1", SELECT_COURSE);
        sqlx::query_as::<_, CourseRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get course {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Course with id {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<CourseResponseDto> {
        self.find(id).await.map(Into::into)
    }

    /// Create a course, deriving the slug from the title when none is given
    pub async fn create(&self, dto: CreateCourseDto) -> Result<CourseResponseDto> {
        let title = dto.title.trim().to_string();
        let slug = slug_for_submission(None, &title, dto.slug.as_deref());
        if slug.is_empty() {
            return Err(AppError::field(
                "slug",
                "could not be derived from the title; enter one manually",
            ));
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO courses
                (title, slug, description, category_id, instructor_id, price, level, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&title)
        .bind(&slug)
        .bind(non_blank(dto.description))
        .bind(dto.category_id)
        .bind(dto.instructor_id)
        .bind(dto.price)
        .bind(dto.level)
        .bind(dto.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::info!("Course {} created with slug '{}'", id, slug);
        self.get(id).await
    }

    /// Partial update. The slug keeps following the title unless it was customised.
    pub async fn update(&self, id: i64, dto: UpdateCourseDto) -> Result<CourseResponseDto> {
        let current = self.find(id).await?;

        let title = dto
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| current.title.clone());
        let slug = slug_for_submission(
            Some((current.title.as_str(), current.slug.as_str())),
            &title,
            dto.slug.as_deref(),
        );
        if slug.is_empty() {
            return Err(AppError::field(
                "slug",
                "could not be derived from the title; enter one manually",
            ));
        }

        let result = sqlx::query(
            r#"
            UPDATE courses
            SET title = $1, slug = $2, description = $3, category_id = $4, instructor_id = $5,
                price = $6, level = $7, is_published = $8, updated_at = NOW()
            WHERE id = $9
            "#,
        )
        .bind(&title)
        .bind(&slug)
        .bind(merge_text(current.description, dto.description))
        .bind(merge_ref(current.category_id, dto.category_id))
        .bind(merge_ref(current.instructor_id, dto.instructor_id))
        .bind(dto.price.unwrap_or(current.price))
        .bind(dto.level.unwrap_or(current.level))
        .bind(dto.is_published.unwrap_or(current.is_published))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Course with id {} not found", id)));
        }

        self.get(id).await
    }

    /// Delete a course and its lessons. Enrollments keep a dangling reference.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Course with id {} not found", id)));
        }

        tracing::info!("Course {} deleted", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &CourseQuery) {
    let mut prefix = " WHERE ";
    if let Some(category_id) = query.category_id {
        qb.push(prefix).push("co.category_id = ").push_bind(category_id);
        prefix = " AND ";
    }
    if let Some(instructor_id) = query.instructor_id {
        qb.push(prefix).push("co.instructor_id = ").push_bind(instructor_id);
        prefix = " AND ";
    }
    if let Some(level) = query.level {
        qb.push(prefix).push("co.level = ").push_bind(level);
        prefix = " AND ";
    }
    if let Some(published) = query.is_published {
        qb.push(prefix).push("co.is_published = ").push_bind(published);
        prefix = " AND ";
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term);
        qb.push(prefix)
            .push("(co.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR co.slug ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::courses::models::CourseLevel;
    use rust_decimal::Decimal;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_slug_follows_title_until_customised(pool: PgPool) {
        let service = CourseService::new(pool);

        let created = service
            .create(CreateCourseDto {
                title: "Intro to Rust".to_string(),
                slug: None,
                description: Some("  ".to_string()),
                category_id: None,
                instructor_id: None,
                price: Decimal::ZERO,
                level: CourseLevel::Beginner,
                is_published: false,
            })
            .await
            .unwrap();
        assert_eq!(created.slug, "intro-to-rust");
        assert_eq!(created.description, None);
        assert_eq!(created.price_label, "Free");
        assert!(created.category.is_none());

        let renamed = service
            .update(
                created.id,
                UpdateCourseDto {
                    title: Some("Rust in Depth".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.slug, "rust-in-depth");

        let custom = service
            .update(
                created.id,
                UpdateCourseDto {
                    slug: Some("rust-deep-dive".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let retitled = service
            .update(
                custom.id,
                UpdateCourseDto {
                    title: Some("Rust Mastery".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(retitled.slug, "rust-deep-dive");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_filters_by_published(pool: PgPool) {
        let service = CourseService::new(pool);
        for (title, published) in [("Alpha", true), ("Beta", false)] {
            service
                .create(CreateCourseDto {
                    title: title.to_string(),
                    slug: None,
                    description: None,
                    category_id: None,
                    instructor_id: None,
                    price: Decimal::new(4999, 2),
                    level: CourseLevel::Advanced,
                    is_published: published,
                })
                .await
                .unwrap();
        }

        let query = CourseQuery {
            page: 1,
            page_size: 10,
            is_published: Some(true),
            ..Default::default()
        };
        let (courses, total) = service.list(&query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(courses[0].title, "Alpha");
        assert_eq!(courses[0].price_label, "$49.99");
    }
}
