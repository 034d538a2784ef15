//! Lessons and their ordering within a course.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/lessons` | Paginated index, by course then position |
//! | POST | `/api/lessons` | Create (appended when no position is given) |
//! | GET | `/api/lessons/{id}` | Show with resolved video |
//! | PUT | `/api/lessons/{id}` | Partial update |
//! | DELETE | `/api/lessons/{id}` | Delete |
//! | POST | `/api/lessons/{id}/move` | Swap with the previous/next lesson |
//! | GET | `/api/courses/{id}/positions` | Positions in use plus suggestions |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sequencer;
pub mod services;

pub use services::LessonService;
