pub mod category;
pub mod history;
pub mod lesson;
pub mod question;
pub mod settings;
pub use category::{Category, Difficulty};
pub use history::HistoryItem;
pub use lesson::{Lesson, LessonItem};
pub use question::{QuizPayload, Question};
pub use settings::Settings;
