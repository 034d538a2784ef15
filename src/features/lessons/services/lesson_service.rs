use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::lessons::dtos::{
    CoursePositionsDto, CreateLessonDto, LessonPositionDto, LessonQuery, LessonResponseDto,
    UpdateLessonDto,
};
use crate::features::lessons::models::LessonRow;
use crate::features::lessons::sequencer::{
    append_position, apply, first_unused, next_available, plan_move, LessonPosition, MoveDirection,
};
use crate::shared::forms::{merge_text, non_blank};

const SELECT_LESSON: &str = r#"
    SELECT l.id, l.course_id, l.title, l.content, l.position, l.video_url, l.is_published,
           l.created_at, l.updated_at,
           co.title AS course_title, co.slug AS course_slug
    FROM lessons l
    JOIN courses co ON co.id = l.course_id
"#;

/// Service for lessons and their ordering within a course
pub struct LessonService {
    pool: PgPool,
}

impl LessonService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated index, ordered by course then position
    pub async fn list(&self, query: &LessonQuery) -> Result<(Vec<LessonResponseDto>, i64)> {
        let pagination = query.pagination();

        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM lessons l");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count lessons: {:?}", e);
                AppError::Database(e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_LESSON);
        push_filters(&mut qb, query);
        qb.push(" ORDER BY l.course_id, l.position, l.id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<LessonRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list lessons: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Every lesson of a course in display order
    pub async fn list_for_course(&self, course_id: i64) -> Result<Vec<LessonResponseDto>> {
        let query = format!("{} WHERE l.course_id = $1 ORDER BY l.position, l.id", SELECT_LESSON);
        let rows: Vec<LessonRow> = sqlx::query_as(&query)
            .bind(course_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list lessons of course {}: {:?}", course_id, e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i64) -> Result<LessonRow> {
        let query = format!("{} WHERE l.id = $1", SELECT_LESSON);
        sqlx::query_as::<_, LessonRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get lesson {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Lesson with id {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<LessonResponseDto> {
        self.find(id).await.map(Into::into)
    }

    /// Create a lesson. Without a position it is appended to the course.
    pub async fn create(&self, dto: CreateLessonDto) -> Result<LessonResponseDto> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_course(&mut tx, dto.course_id).await?;
        let position = match dto.position {
            Some(position) => {
                ensure_position_free(&mut tx, dto.course_id, position, None).await?;
                position
            }
            None => append_position(&positions_in(&mut tx, dto.course_id).await?),
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO lessons (course_id, title, content, position, video_url, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(dto.course_id)
        .bind(dto.title.trim())
        .bind(&dto.content)
        .bind(position)
        .bind(non_blank(dto.video_url))
        .bind(dto.is_published)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        tracing::info!(
            "Lesson {} created in course {} at position {}",
            id,
            dto.course_id,
            position
        );
        self.get(id).await
    }

    /// Partial update.
    ///
    /// A lesson moved to another course without an explicit position is
    /// appended there; an explicit position must be free in the target course.
    pub async fn update(&self, id: i64, dto: UpdateLessonDto) -> Result<LessonResponseDto> {
        let current = self.find(id).await?;
        let course_id = dto.course_id.unwrap_or(current.course_id);
        let changed_course = course_id != current.course_id;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_course(&mut tx, course_id).await?;
        let position = match dto.position {
            Some(position) => {
                ensure_position_free(&mut tx, course_id, position, Some(id)).await?;
                position
            }
            None if changed_course => append_position(&positions_in(&mut tx, course_id).await?),
            None => current.position,
        };

        let result = sqlx::query(
            r#"
            UPDATE lessons
            SET course_id = $1, title = $2, content = $3, position = $4, video_url = $5,
                is_published = $6, updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(course_id)
        .bind(dto.title.as_deref().map(str::trim).unwrap_or(&current.title))
        .bind(dto.content.as_deref().unwrap_or(&current.content))
        .bind(position)
        .bind(merge_text(current.video_url.clone(), dto.video_url))
        .bind(dto.is_published.unwrap_or(current.is_published))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Lesson with id {} not found", id)));
        }

        tx.commit().await.map_err(map_db_error)?;

        if changed_course {
            tracing::info!(
                "Lesson {} moved from course {} to course {} at position {}",
                id,
                current.course_id,
                course_id,
                position
            );
        }
        self.get(id).await
    }

    /// Delete a lesson. Remaining positions are left as they are.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Lesson with id {} not found", id)));
        }

        tracing::info!("Lesson {} deleted", id);
        Ok(())
    }

    /// Positions in use within a course, ascending
    pub async fn list_positions(&self, course_id: i64) -> Result<Vec<i32>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        positions_in(&mut conn, course_id).await
    }

    /// One past the course's current lesson count
    pub async fn next_available_position(&self, course_id: i64) -> Result<i32> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        Ok(next_available(lesson_count(&mut conn, course_id).await?))
    }

    /// First unused position >= 1 (a suggestion only, never applied automatically)
    pub async fn first_unused_position(&self, course_id: i64) -> Result<i32> {
        Ok(first_unused(&self.list_positions(course_id).await?))
    }

    /// Position a lesson created without one would get right now
    pub async fn append_position(&self, course_id: i64) -> Result<i32> {
        Ok(append_position(&self.list_positions(course_id).await?))
    }

    /// Position summary for a course; unknown courses are `NotFound`
    pub async fn course_positions(&self, course_id: i64) -> Result<CoursePositionsDto> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
            .bind(course_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Course with id {} not found",
                course_id
            )));
        }

        Ok(CoursePositionsDto {
            course_id,
            positions: self.list_positions(course_id).await?,
            next_available: self.next_available_position(course_id).await?,
            first_unused: self.first_unused_position(course_id).await?,
            append_at: self.append_position(course_id).await?,
        })
    }

    /// Swap a lesson with its neighbour in the given direction.
    ///
    /// All lessons of the course are locked for the duration, so concurrent
    /// moves serialise. Returns the course's positions after the swap.
    pub async fn move_lesson(
        &self,
        lesson_id: i64,
        direction: MoveDirection,
    ) -> Result<Vec<LessonPositionDto>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let course_id: i64 = sqlx::query_scalar("SELECT course_id FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Lesson with id {} not found", lesson_id)))?;

        let siblings: Vec<LessonPosition> = sqlx::query_as::<_, (i64, i32)>(
            r#"
            SELECT id, position FROM lessons
            WHERE course_id = $1
            ORDER BY position, id
            FOR UPDATE
            "#,
        )
        .bind(course_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(|(id, position)| LessonPosition { id, position })
        .collect();

        let updates = plan_move(&siblings, lesson_id, direction)?;

        for update in &updates {
            sqlx::query("UPDATE lessons SET position = $1, updated_at = NOW() WHERE id = $2")
                .bind(update.position)
                .bind(update.id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        tracing::debug!(
            "Lesson {} moved {:?} in course {}",
            lesson_id,
            direction,
            course_id
        );
        Ok(apply(&siblings, &updates)
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

/// Lock the course row so position assignment within it is serialised
async fn lock_course(conn: &mut PgConnection, course_id: i64) -> Result<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM courses WHERE id = $1 FOR UPDATE")
        .bind(course_id)
        .fetch_optional(conn)
        .await
        .map_err(map_db_error)?;

    match found {
        Some(_) => Ok(()),
        None => Err(AppError::field("course_id", "course does not exist")),
    }
}

async fn lesson_count(conn: &mut PgConnection, course_id: i64) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(conn)
        .await
        .map_err(map_db_error)
}

async fn positions_in(conn: &mut PgConnection, course_id: i64) -> Result<Vec<i32>> {
    sqlx::query_scalar("SELECT position FROM lessons WHERE course_id = $1 ORDER BY position")
        .bind(course_id)
        .fetch_all(conn)
        .await
        .map_err(map_db_error)
}

async fn ensure_position_free(
    conn: &mut PgConnection,
    course_id: i64,
    position: i32,
    exclude_id: Option<i64>,
) -> Result<()> {
    let taken: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM lessons
            WHERE course_id = $1 AND position = $2 AND ($3::BIGINT IS NULL OR id <> $3)
        )
        "#,
    )
    .bind(course_id)
    .bind(position)
    .bind(exclude_id)
    .fetch_one(conn)
    .await
    .map_err(map_db_error)?;

    if taken {
        return Err(AppError::Conflict(format!(
            "Position {} is already taken in this course",
            position
        )));
    }
    Ok(())
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &LessonQuery) {
    let mut prefix = " WHERE ";
    if let Some(course_id) = query.course_id {
        qb.push(prefix).push("l.course_id = ").push_bind(course_id);
        prefix = " AND ";
    }
    if let Some(published) = query.is_published {
        qb.push(prefix).push("l.is_published = ").push_bind(published);
    }
}
