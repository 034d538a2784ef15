//! Enrollments of users in courses.
//!
//! One enrollment per (user, course) is advisory: a duplicate is refused
//! with 409 unless the request sets `confirm_duplicate`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/enrollments` | Paginated index |
//! | POST | `/api/enrollments` | Create |
//! | GET | `/api/enrollments/exists` | Duplicate check for a (user, course) pair |
//! | GET | `/api/enrollments/{id}` | Show |
//! | PUT | `/api/enrollments/{id}` | Partial update |
//! | DELETE | `/api/enrollments/{id}` | Soft delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::EnrollmentService;
