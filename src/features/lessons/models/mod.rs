mod lesson;

pub use lesson::LessonRow;
