mod enrollment_dto;

pub use enrollment_dto::*;
