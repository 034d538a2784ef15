mod lesson_dto;

pub use lesson_dto::*;
