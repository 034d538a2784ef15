use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::*;
use crate::features::users::models::UserRole;

#[derive(sqlx::FromRow)]
struct Counts {
    categories: i64,
    courses_total: i64,
    courses_published: i64,
    courses_free: i64,
    lessons_total: i64,
    lessons_published: i64,
    enrollments_total: i64,
    enrollments_active: i64,
}

/// Service for dashboard statistics
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> Result<DashboardStatsDto> {
        let counts = sqlx::query_as::<_, Counts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM categories) AS categories,
                (SELECT COUNT(*) FROM courses) AS courses_total,
                (SELECT COUNT(*) FROM courses WHERE is_published) AS courses_published,
                (SELECT COUNT(*) FROM courses WHERE price = 0) AS courses_free,
                (SELECT COUNT(*) FROM lessons) AS lessons_total,
                (SELECT COUNT(*) FROM lessons WHERE is_published) AS lessons_published,
                (SELECT COUNT(*) FROM enrollments WHERE deleted_at IS NULL) AS enrollments_total,
                (SELECT COUNT(*) FROM enrollments
                  WHERE deleted_at IS NULL AND is_active) AS enrollments_active
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard counts: {:?}", e);
            AppError::Database(e)
        })?;

        let roles: Vec<(UserRole, i64)> =
            sqlx::query_as("SELECT role, COUNT(*) FROM users GROUP BY role")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count users by role: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(DashboardStatsDto {
            categories: counts.categories,
            courses: CourseStatsDto {
                total: counts.courses_total,
                published: counts.courses_published,
                free: counts.courses_free,
            },
            lessons: LessonStatsDto {
                total: counts.lessons_total,
                published: counts.lessons_published,
            },
            enrollments: EnrollmentStatsDto {
                total: counts.enrollments_total,
                active: counts.enrollments_active,
            },
            users_by_role: fill_roles(&roles),
        })
    }
}

/// One entry per role in a fixed order, zero where the query had no row
fn fill_roles(counts: &[(UserRole, i64)]) -> Vec<RoleCountDto> {
    [UserRole::Admin, UserRole::Instructor, UserRole::Student]
        .into_iter()
        .map(|role| RoleCountDto {
            role,
            count: counts
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, c)| *c)
                .unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_roles_count_as_zero() {
        let filled = fill_roles(&[(UserRole::Student, 12), (UserRole::Admin, 1)]);
        let pairs: Vec<(UserRole, i64)> = filled.iter().map(|r| (r.role, r.count)).collect();
        assert_eq!(
            pairs,
            vec![
                (UserRole::Admin, 1),
                (UserRole::Instructor, 0),
                (UserRole::Student, 12)
            ]
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_stats_on_empty_database(pool: PgPool) {
        let stats = DashboardService::new(pool).stats().await.unwrap();
        assert_eq!(stats.categories, 0);
        assert_eq!(stats.courses.total, 0);
        assert!(stats.users_by_role.iter().all(|r| r.count == 0));
        assert_eq!(stats.users_by_role.len(), 3);
    }
}
