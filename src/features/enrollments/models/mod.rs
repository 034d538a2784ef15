mod enrollment;

pub use enrollment::EnrollmentRow;
