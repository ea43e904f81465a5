//! Front-end core: the state machines a UI drives, independent of rendering.

pub mod backend;
pub mod cancel;
pub mod dashboard;
pub mod lesson_viewer;
pub mod practice;
pub mod quiz_session;

pub use backend::{HttpPrepClient, LocalBackend, PrepBackend};
pub use cancel::CancelToken;
pub use dashboard::{Dashboard, Mode};
pub use lesson_viewer::{LessonPhase, LessonViewer};
pub use practice::{Feedback, PracticeLoop};
pub use quiz_session::{Advance, QuizPhase, QuizResult, QuizSession};
