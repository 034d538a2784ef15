pub mod categories;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod lessons;
pub mod pages;
pub mod previews;
pub mod users;
