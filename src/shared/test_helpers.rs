use sqlx::{postgres::PgPoolOptions, PgPool};

/// Pool that never connects until a query runs.
///
/// Handler tests use it for requests that are rejected before any query
/// (validation, malformed JSON), so they pass without a database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://localhost/coursedesk_test")
        .unwrap()
}

/// Fixtures for rendering admin templates without a database
pub mod fixtures {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::features::categories::dtos::CategorySummaryDto;
    use crate::features::courses::dtos::{CourseResponseDto, CourseSummaryDto};
    use crate::features::courses::models::CourseLevel;
    use crate::features::dashboard::dtos::{
        CourseStatsDto, DashboardStatsDto, EnrollmentStatsDto, LessonStatsDto, RoleCountDto,
    };
    use crate::features::enrollments::dtos::EnrollmentResponseDto;
    use crate::features::lessons::dtos::LessonResponseDto;
    use crate::features::users::dtos::UserSummaryDto;
    use crate::features::users::models::UserRole;
    use crate::shared::price::PriceLabel;
    use crate::shared::video::resolve_video;

    pub fn course(price: Decimal, with_relations: bool) -> CourseResponseDto {
        let now = Utc::now();
        let label = PriceLabel::from(price);
        CourseResponseDto {
            id: 1,
            title: "Rust for Web Developers".to_string(),
            slug: "rust-for-web-developers".to_string(),
            description: Some("Axum, sqlx and friends".to_string()),
            category: with_relations.then(|| CategorySummaryDto {
                id: 2,
                name: "Programming".to_string(),
                slug: "programming".to_string(),
                color: None,
            }),
            instructor: with_relations.then(|| UserSummaryDto {
                id: 3,
                name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
            }),
            price,
            price_label: label.to_string(),
            is_free: label.is_free(),
            level: CourseLevel::Beginner,
            is_published: true,
            lesson_count: 2,
            enrollment_count: 5,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn lesson(id: i64, position: i32, video_url: Option<&str>) -> LessonResponseDto {
        let now = Utc::now();
        let video = video_url.map(resolve_video);
        LessonResponseDto {
            id,
            course: CourseSummaryDto {
                id: 1,
                title: "Rust for Web Developers".to_string(),
                slug: "rust-for-web-developers".to_string(),
            },
            title: format!("Lesson <{}>", id),
            content: "<p><strong>Borrowing</strong> explained</p>".to_string(),
            position,
            video_url: video_url.map(str::to_string),
            video_embed_url: video.as_ref().and_then(|v| v.embed_url()),
            video,
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn enrollment(with_relations: bool) -> EnrollmentResponseDto {
        let now = Utc::now();
        EnrollmentResponseDto {
            id: 1,
            user_id: Some(3),
            course_id: Some(1),
            user: with_relations.then(|| UserSummaryDto {
                id: 3,
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            }),
            course: with_relations.then(|| CourseSummaryDto {
                id: 1,
                title: "Rust for Web Developers".to_string(),
                slug: "rust-for-web-developers".to_string(),
            }),
            enrolled_at: now,
            is_active: true,
            notes: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stats() -> DashboardStatsDto {
        DashboardStatsDto {
            categories: 4,
            courses: CourseStatsDto {
                total: 9,
                published: 7,
                free: 2,
            },
            lessons: LessonStatsDto {
                total: 31,
                published: 30,
            },
            enrollments: EnrollmentStatsDto {
                total: 120,
                active: 101,
            },
            users_by_role: vec![
                RoleCountDto {
                    role: UserRole::Admin,
                    count: 1,
                },
                RoleCountDto {
                    role: UserRole::Instructor,
                    count: 3,
                },
                RoleCountDto {
                    role: UserRole::Student,
                    count: 80,
                },
            ],
        }
    }
}
