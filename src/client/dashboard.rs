use crate::{
    client::quiz_session::QuizSession,
    errors::{AppError, AppResult},
    models::domain::{
        settings::QUESTION_COUNT_CHOICES, Category, Difficulty, HistoryItem,
    },
    repositories::{HistoryRepository, SettingsRepository},
};

pub const RECENT_HISTORY_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Quiz,
    Teach,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
}

/// Landing view: recent attempts, the chosen difficulty, and the entry
/// points into a quiz or a lesson.
pub struct Dashboard {
    history: HistoryRepository,
    settings: SettingsRepository,
    recent: Vec<HistoryItem>,
    difficulty: Difficulty,
}

impl Dashboard {
    pub fn mount(history: HistoryRepository, settings: SettingsRepository) -> AppResult<Self> {
        let mut dashboard = Self {
            history,
            settings,
            recent: Vec::new(),
            difficulty: Difficulty::default(),
        };
        dashboard.refresh()?;
        Ok(dashboard)
    }

    /// Rereads history and settings, e.g. after a quiz finishes.
    pub fn refresh(&mut self) -> AppResult<()> {
        self.recent = self.history.recent(RECENT_HISTORY_LEN)?;
        self.difficulty = self.settings.load()?.difficulty;
        Ok(())
    }

    pub fn recent(&self) -> &[HistoryItem] {
        &self.recent
    }

    pub fn history(&self) -> &HistoryRepository {
        &self.history
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn save_difficulty(&mut self, difficulty: Difficulty) -> AppResult<()> {
        self.settings.save_difficulty(difficulty)?;
        self.difficulty = difficulty;
        log::debug!("Difficulty set to {difficulty}");
        Ok(())
    }

    pub fn category_cards(&self, mode: Mode) -> Vec<CategoryCard> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryCard {
                category,
                title: category.label(),
                description: match mode {
                    Mode::Quiz => category.quiz_description(),
                    Mode::Teach => category.lesson_description(),
                },
            })
            .collect()
    }

    /// A fresh session at the stored difficulty. Only the offered quiz
    /// lengths are accepted.
    pub fn start_quiz(&self, category: Category, count: u32) -> AppResult<QuizSession> {
        if !QUESTION_COUNT_CHOICES.contains(&count) {
            return Err(AppError::ValidationError(format!(
                "Question count must be one of {QUESTION_COUNT_CHOICES:?}"
            )));
        }
        Ok(QuizSession::new(category, count, self.difficulty))
    }
}
