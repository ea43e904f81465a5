use crate::{
    client::{
        backend::{lesson_from_payload, PrepBackend},
        cancel::CancelToken,
        practice::PracticeLoop,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{Category, Lesson},
        dto::request::TeachRequest,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonPhase {
    Idle,
    Loading(Category),
    Ready(Category),
    Error(String),
}

/// Teach mode. Holds at most one lesson; opening the category already on
/// screen shows it again without another fetch.
pub struct LessonViewer {
    phase: LessonPhase,
    loaded: Option<(Category, Lesson)>,
    practice: Option<PracticeLoop>,
}

impl Default for LessonViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl LessonViewer {
    pub fn new() -> Self {
        Self {
            phase: LessonPhase::Idle,
            loaded: None,
            practice: None,
        }
    }

    pub fn phase(&self) -> &LessonPhase {
        &self.phase
    }

    pub async fn open(
        &mut self,
        category: Category,
        backend: &dyn PrepBackend,
        cancel: &CancelToken,
    ) -> AppResult<&Lesson> {
        if matches!(&self.loaded, Some((loaded, _)) if *loaded == category) {
            log::debug!("Reusing lesson for {category}");
            self.phase = LessonPhase::Ready(category);
            self.reset_practice()?;
            return self.lesson().ok_or_else(missing_lesson);
        }

        self.phase = LessonPhase::Loading(category);
        let request = TeachRequest::new(category);
        let fetched = match cancel.run(backend.teach(&request)).await {
            Err(AppError::Cancelled) => {
                self.phase = LessonPhase::Idle;
                return Err(AppError::Cancelled);
            }
            other => other.and_then(lesson_from_payload),
        };

        match fetched {
            Ok(lesson) => {
                log::info!(
                    "Loaded {category} lesson with {} examples and {} practice items",
                    lesson.examples.len(),
                    lesson.practice.len()
                );
                self.loaded = Some((category, lesson));
                self.phase = LessonPhase::Ready(category);
                self.reset_practice()?;
                self.lesson().ok_or_else(missing_lesson)
            }
            Err(err) => {
                log::warn!("Lesson for {category} failed to load: {err}");
                self.phase = LessonPhase::Error(err.to_string());
                Err(err)
            }
        }
    }

    fn reset_practice(&mut self) -> AppResult<()> {
        self.practice = match &self.loaded {
            Some((_, lesson)) if !lesson.practice.is_empty() => {
                Some(PracticeLoop::new(lesson.practice.clone())?)
            }
            _ => None,
        };
        Ok(())
    }

    /// Returns to category selection and drops the lesson.
    pub fn back(&mut self) {
        self.phase = LessonPhase::Idle;
        self.loaded = None;
        self.practice = None;
    }

    pub fn lesson(&self) -> Option<&Lesson> {
        match (&self.phase, &self.loaded) {
            (LessonPhase::Ready(shown), Some((category, lesson))) if shown == category => {
                Some(lesson)
            }
            _ => None,
        }
    }

    /// The practice loop for the lesson on screen.
    pub fn practice_mut(&mut self) -> AppResult<&mut PracticeLoop> {
        if self.lesson().is_none() {
            return Err(AppError::ValidationError("No lesson is open".to_string()));
        }
        self.practice
            .as_mut()
            .ok_or_else(|| AppError::NotFound(super::practice::NO_PRACTICE_QUESTIONS.to_string()))
    }
}

fn missing_lesson() -> AppError {
    AppError::InternalError("Lesson missing after load".to_string())
}
