//! A single quiz attempt, from the generation request to the score screen.
//!
//! Phases run `Loading -> Ready -> Answering -> Finished`. `Error` is only
//! reachable from `Loading` and absorbs the session; the caller exits from it.

use std::collections::HashMap;

use crate::{
    client::{
        backend::{questions_from_payload, PrepBackend},
        cancel::CancelToken,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{history::percentage, Category, Difficulty, HistoryItem, Question},
        dto::request::GenerateQuizRequest,
    },
    repositories::HistoryRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Ready,
    Answering,
    Finished,
    Error(String),
}

/// Outcome of pressing "next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// No answer is recorded for the current question yet.
    Inert,
    /// Moved to the question at this index.
    Next(usize),
    Finished(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub question_text: String,
    pub context: Option<String>,
    pub options: Vec<String>,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub review: Vec<ReviewEntry>,
    /// False when the attempt could not be written to history.
    pub recorded: bool,
}

pub struct QuizSession {
    category: Category,
    count: u32,
    difficulty: Difficulty,
    phase: QuizPhase,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<usize, String>,
    recorded: bool,
}

impl QuizSession {
    pub fn new(category: Category, count: u32, difficulty: Difficulty) -> Self {
        Self {
            category,
            count,
            difficulty,
            phase: QuizPhase::Loading,
            questions: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            recorded: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Fetches the questions. Runs once; a cancelled fetch leaves the
    /// session untouched in `Loading`.
    pub async fn load(&mut self, backend: &dyn PrepBackend, cancel: &CancelToken) -> AppResult<()> {
        if self.phase != QuizPhase::Loading {
            return Err(AppError::ValidationError(
                "Quiz questions have already been loaded".to_string(),
            ));
        }

        let request = GenerateQuizRequest::new(self.category, self.count, self.difficulty);
        let loaded = match cancel.run(backend.generate_quiz(&request)).await {
            Err(AppError::Cancelled) => {
                log::debug!("Quiz fetch for {} cancelled", self.category);
                return Err(AppError::Cancelled);
            }
            Ok(payload) => questions_from_payload(payload),
            Err(err) => Err(err),
        };

        match loaded {
            Ok(questions) => {
                log::info!("Loaded {} {} questions", questions.len(), self.category);
                self.questions = questions;
                self.current_index = 0;
                self.answers.clear();
                self.phase = QuizPhase::Ready;
                Ok(())
            }
            Err(err) => {
                log::warn!("Quiz for {} failed to load: {err}", self.category);
                self.phase = QuizPhase::Error(err.to_string());
                Err(err)
            }
        }
    }

    fn is_answering(&self) -> bool {
        matches!(self.phase, QuizPhase::Ready | QuizPhase::Answering)
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.is_answering() {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answers.get(&self.current_index).map(String::as_str)
    }

    /// `(position, total)`, position counted from one.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.questions.len())
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    /// Records or overwrites the answer for the current question.
    pub fn select_answer(&mut self, option: &str) -> AppResult<()> {
        let question = self.current_question().ok_or_else(|| {
            AppError::ValidationError("No question is awaiting an answer".to_string())
        })?;
        if !question.options.iter().any(|o| o == option) {
            return Err(AppError::ValidationError(format!(
                "\"{option}\" is not an option for question {}",
                self.current_index + 1
            )));
        }

        self.answers.insert(self.current_index, option.to_string());
        self.phase = QuizPhase::Answering;
        Ok(())
    }

    /// Moves past the current question. Finishing records the attempt in
    /// `history`; a failed write still finishes, with `recorded` unset.
    pub fn advance(&mut self, history: &HistoryRepository) -> AppResult<Advance> {
        if !self.is_answering() {
            return Err(AppError::ValidationError(
                "Quiz is not accepting answers".to_string(),
            ));
        }
        if self.current_answer().is_none() {
            return Ok(Advance::Inert);
        }

        if !self.is_last_question() {
            self.current_index += 1;
            return Ok(Advance::Next(self.current_index));
        }

        self.phase = QuizPhase::Finished;
        let item = HistoryItem::new(
            self.category.label(),
            self.score(),
            self.questions.len() as u32,
        );
        self.recorded = match history.append(item) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Failed to record {} quiz in history: {err}", self.category);
                false
            }
        };
        let result = self.tally();
        log::info!(
            "Finished {} quiz with {}/{}",
            self.category,
            result.score,
            result.total
        );
        Ok(Advance::Finished(result))
    }

    pub fn score(&self) -> u32 {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i).is_some_and(|a| q.is_correct(a)))
            .count() as u32
    }

    fn tally(&self) -> QuizResult {
        let score = self.score();
        let total = self.questions.len() as u32;
        let review = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let user_answer = self.answers.get(&i).cloned();
                ReviewEntry {
                    question_text: q.question_text.clone(),
                    context: q.context.clone(),
                    options: q.options.clone(),
                    is_correct: user_answer.as_deref().is_some_and(|a| q.is_correct(a)),
                    user_answer,
                    correct_answer: q.correct_answer.clone(),
                    explanation: q.explanation.clone(),
                }
            })
            .collect();

        QuizResult {
            score,
            total,
            percentage: percentage(score, total),
            review,
            recorded: self.recorded,
        }
    }

    pub fn result(&self) -> Option<QuizResult> {
        (self.phase == QuizPhase::Finished).then(|| self.tally())
    }

    /// Starts the same questions again without refetching.
    pub fn retry(&mut self) -> AppResult<()> {
        if self.phase != QuizPhase::Finished {
            return Err(AppError::ValidationError(
                "Only a finished quiz can be retried".to_string(),
            ));
        }
        self.current_index = 0;
        self.answers.clear();
        self.recorded = false;
        self.phase = QuizPhase::Ready;
        Ok(())
    }

    /// Ends the session, handing back the result if the quiz was finished.
    pub fn exit(self) -> Option<QuizResult> {
        self.result()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        repositories::{InMemoryStore, KeyValueStore},
        test_utils::{fixtures::quiz_json, StaticBackend},
    };

    /// Reads succeed but every write fails.
    struct FullDiskStore;

    impl KeyValueStore for FullDiskStore {
        fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::StorageError("disk full".to_string()))
        }
    }

    fn history() -> HistoryRepository {
        HistoryRepository::new(Arc::new(InMemoryStore::new()), 100)
    }

    async fn ready_session(count: usize) -> QuizSession {
        let backend = StaticBackend::quiz(quiz_json(Category::OddOneOut, count));
        let mut session = QuizSession::new(Category::OddOneOut, count as u32, Difficulty::College);
        session.load(&backend, &CancelToken::new()).await.unwrap();
        session
    }

    fn answer_all(session: &mut QuizSession, history: &HistoryRepository, correct: usize) -> Advance {
        let mut last = Advance::Inert;
        for i in 0..session.questions().len() {
            let question = session.current_question().unwrap().clone();
            let answer = if i < correct {
                question.correct_answer.clone()
            } else {
                question
                    .options
                    .iter()
                    .find(|o| **o != question.correct_answer)
                    .unwrap()
                    .clone()
            };
            session.select_answer(&answer).unwrap();
            last = session.advance(history).unwrap();
        }
        last
    }

    #[tokio::test]
    async fn test_load_moves_to_ready_at_first_question() {
        let session = ready_session(5).await;

        assert_eq!(session.phase(), &QuizPhase::Ready);
        assert_eq!(session.questions().len(), 5);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.progress(), (1, 5));
    }

    #[tokio::test]
    async fn test_empty_question_list_is_an_error_phase() {
        let backend = StaticBackend::quiz(serde_json::json!({ "questions": [] }));
        let mut session = QuizSession::new(Category::Analogy, 5, Difficulty::College);

        let err = session.load(&backend, &CancelToken::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "No questions generated. Please try again.");
        assert_eq!(
            session.phase(),
            &QuizPhase::Error("No questions generated. Please try again.".to_string())
        );
        assert!(session.current_question().is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_is_an_error_phase() {
        let backend = StaticBackend::failing(AppError::UpstreamError("Failed to generate quiz".into()));
        let mut session = QuizSession::new(Category::Analogy, 5, Difficulty::College);

        assert!(session.load(&backend, &CancelToken::new()).await.is_err());
        assert_eq!(session.phase(), &QuizPhase::Error("Failed to generate quiz".to_string()));
    }

    #[tokio::test]
    async fn test_cancelled_load_leaves_session_loading() {
        let backend = StaticBackend::quiz(quiz_json(Category::OddOneOut, 5));
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut session = QuizSession::new(Category::OddOneOut, 5, Difficulty::College);

        let err = session.load(&backend, &cancel).await.unwrap_err();
        assert_eq!(err, AppError::Cancelled);
        assert_eq!(session.phase(), &QuizPhase::Loading);
        assert!(session.questions().is_empty());
    }

    #[tokio::test]
    async fn test_advance_is_inert_without_answer() {
        let mut session = ready_session(3).await;
        let history = history();

        assert_eq!(session.advance(&history).unwrap(), Advance::Inert);
        assert_eq!(session.current_index(), 0);
    }

    #[tokio::test]
    async fn test_answers_can_be_overwritten_before_advancing() {
        let mut session = ready_session(2).await;
        let options = session.current_question().unwrap().options.clone();

        session.select_answer(&options[0]).unwrap();
        session.select_answer(&options[1]).unwrap();

        assert_eq!(session.phase(), &QuizPhase::Answering);
        assert_eq!(session.current_answer(), Some(options[1].as_str()));
    }

    #[tokio::test]
    async fn test_unknown_option_is_rejected() {
        let mut session = ready_session(2).await;
        assert!(session.select_answer("not listed").is_err());
        assert_eq!(session.current_answer(), None);
    }

    #[tokio::test]
    async fn test_three_of_five_scores_sixty_percent_and_records_history() {
        let mut session = ready_session(5).await;
        let history = history();

        let last = answer_all(&mut session, &history, 3);

        let Advance::Finished(result) = last else {
            panic!("expected the quiz to finish, got {last:?}");
        };
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 5);
        assert_eq!(result.percentage, 60);
        assert_eq!(result.review.iter().filter(|r| r.is_correct).count(), 3);
        assert!(result.recorded);
        assert_eq!(session.phase(), &QuizPhase::Finished);

        let items = history.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Odd One Out");
        assert_eq!((items[0].score, items[0].total), (3, 5));
    }

    #[tokio::test]
    async fn test_failed_history_write_still_finishes_with_result() {
        let mut session = ready_session(3).await;
        let history = HistoryRepository::new(Arc::new(FullDiskStore), 100);

        let last = answer_all(&mut session, &history, 2);

        let Advance::Finished(result) = last else {
            panic!("expected the quiz to finish, got {last:?}");
        };
        assert_eq!((result.score, result.total, result.percentage), (2, 3, 67));
        assert!(!result.recorded);
        assert_eq!(session.phase(), &QuizPhase::Finished);
        assert_eq!(session.result(), Some(result));
        assert!(session.retry().is_ok());
    }

    #[tokio::test]
    async fn test_retry_reuses_questions_and_clears_answers() {
        let mut session = ready_session(2).await;
        let history = history();
        let ids: Vec<String> = session.questions().iter().map(|q| q.id.clone()).collect();
        answer_all(&mut session, &history, 2);

        session.retry().unwrap();

        assert_eq!(session.phase(), &QuizPhase::Ready);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_answer(), None);
        assert_eq!(session.score(), 0);
        let after: Vec<String> = session.questions().iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids, after);
    }

    #[tokio::test]
    async fn test_retry_is_only_allowed_when_finished() {
        let mut session = ready_session(2).await;
        assert!(session.retry().is_err());
    }

    #[tokio::test]
    async fn test_exit_hands_back_final_result() {
        let mut session = ready_session(1).await;
        let history = history();
        answer_all(&mut session, &history, 1);

        let result = session.exit().unwrap();
        assert_eq!(result.percentage, 100);
    }
}
