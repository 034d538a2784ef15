//! Courses, with their category, instructor and price display.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/courses` | Paginated index (category, level, published, search filters) |
//! | POST | `/api/courses` | Create (slug derived from title when blank) |
//! | GET | `/api/courses/{id}` | Show with lesson and enrollment counts |
//! | PUT | `/api/courses/{id}` | Partial update |
//! | DELETE | `/api/courses/{id}` | Delete with its lessons |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CourseService;
