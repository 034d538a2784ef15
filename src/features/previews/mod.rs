//! Stateless helpers for admin forms.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/slugs/preview` | Slug derived from a title, with auto-fill state |
//! | GET | `/api/videos/resolve` | Provider and embed URL for a video URL |

pub mod dtos;
pub mod handlers;
pub mod routes;
