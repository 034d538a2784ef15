//! Course categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Paginated index with course counts |
//! | POST | `/api/categories` | Create (slug derived from name when blank) |
//! | GET | `/api/categories/{id}` | Show |
//! | GET | `/api/categories/slug/{slug}` | Show by slug |
//! | PUT | `/api/categories/{id}` | Partial update |
//! | DELETE | `/api/categories/{id}` | Delete; courses become uncategorized |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
