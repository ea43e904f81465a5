use crate::{
    errors::{AppError, AppResult},
    models::domain::LessonItem,
};

pub const NO_PRACTICE_QUESTIONS: &str = "No practice questions available.";

/// What the learner sees after committing to an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub selected: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Cycles through a lesson's practice items. Each item takes one attempt;
/// after the last item it wraps back to the first.
#[derive(Debug, Clone)]
pub struct PracticeLoop {
    items: Vec<LessonItem>,
    index: usize,
    feedback: Option<Feedback>,
}

impl PracticeLoop {
    pub fn new(items: Vec<LessonItem>) -> AppResult<Self> {
        if items.is_empty() {
            return Err(AppError::NotFound(NO_PRACTICE_QUESTIONS.to_string()));
        }
        Ok(Self {
            items,
            index: 0,
            feedback: None,
        })
    }

    pub fn current(&self) -> &LessonItem {
        &self.items[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Locks in an answer for the current item. Once feedback is showing,
    /// later selections are ignored and the original feedback is returned.
    pub fn select(&mut self, option: &str) -> AppResult<&Feedback> {
        if self.feedback.is_none() {
            let item = self.current();
            if !item.options.iter().any(|o| o == option) {
                return Err(AppError::ValidationError(format!(
                    "\"{option}\" is not an option for this practice question"
                )));
            }
            let feedback = Feedback {
                selected: option.to_string(),
                is_correct: item.is_correct(option),
                correct_answer: item.correct_answer.clone(),
                explanation: item.explanation.clone(),
            };
            self.feedback = Some(feedback);
        }

        self.feedback
            .as_ref()
            .ok_or_else(|| AppError::InternalError("Practice feedback missing".to_string()))
    }

    /// Moves on once the current item has been answered. Returns whether it
    /// moved.
    pub fn advance(&mut self) -> bool {
        if self.feedback.is_none() {
            return false;
        }
        self.index = (self.index + 1) % self.items.len();
        self.feedback = None;
        true
    }
}
