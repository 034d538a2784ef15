//! Server-rendered admin pages.
//!
//! | Path | Page |
//! |------|------|
//! | `/admin` | Dashboard widgets |
//! | `/admin/courses` | Course index |
//! | `/admin/courses/{id}` | Course with ordered lessons and move buttons |
//! | `/admin/lessons/{id}` | Lesson with video player |
//! | `/admin/enrollments` | Enrollment index |

pub mod handlers;
pub mod routes;

pub use handlers::PagesState;
