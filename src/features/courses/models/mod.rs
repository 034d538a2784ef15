mod course;

pub use course::{CourseLevel, CourseRow};
