mod lesson_handler;

pub use lesson_handler::*;
