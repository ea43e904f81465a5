use once_cell::sync::Lazy;

use crate::{
    constants::prompts::*,
    models::domain::{Category, Difficulty, Lesson, Question},
};

/// The two messages sent to the chat-completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub system: String,
    pub user: String,
}

static QUESTION_SCHEMA: Lazy<String> =
    Lazy::new(|| serde_json::to_string(&schemars::schema_for!(Question)).unwrap_or_default());

static LESSON_SCHEMA: Lazy<String> =
    Lazy::new(|| serde_json::to_string(&schemars::schema_for!(Lesson)).unwrap_or_default());

pub fn difficulty_note(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::HighSchool => HIGH_SCHOOL_NOTE,
        Difficulty::College => COLLEGE_NOTE,
        Difficulty::Academic => ACADEMIC_NOTE,
    }
}

fn quiz_task(category: Category) -> &'static str {
    match category {
        Category::OddOneOut => ODD_ONE_OUT_TASK,
        Category::Analogy => ANALOGY_TASK,
        Category::NonLogicalWord => NON_LOGICAL_WORD_TASK,
        Category::ParagraphMeaning => PARAGRAPH_MEANING_TASK,
    }
}

fn lesson_shape(category: Category) -> &'static str {
    match category {
        Category::OddOneOut => ODD_ONE_OUT_LESSON,
        Category::Analogy => ANALOGY_LESSON,
        Category::NonLogicalWord => NON_LOGICAL_WORD_LESSON,
        Category::ParagraphMeaning => PARAGRAPH_MEANING_LESSON,
    }
}

pub fn build_quiz_prompt(category: Category, difficulty: Difficulty, count: u32) -> PromptSpec {
    let system = QUIZ_SYSTEM_PROMPT.replace("{difficulty_note}", difficulty_note(difficulty));
    let user = format!(
        "Generate {count} \"{category}\" questions at {difficulty} academic level.\n\
         {task}\n\
         Output format: a JSON object with a single key \"questions\" holding an array of exactly {count} question objects.\n\
         JSON schema of one question object:\n{schema}",
        task = quiz_task(category),
        schema = QUESTION_SCHEMA.as_str(),
    );
    PromptSpec { system, user }
}

pub fn build_lesson_prompt(category: Category) -> PromptSpec {
    let title = match category {
        Category::Analogy => "Analogy (Find the Pair)",
        other => other.label(),
    };
    let user = format!(
        "Create a comprehensive lesson for \"{title}\" questions.\n\
         Output format: JSON object with keys:\n{shape}\n\
         JSON schema of the lesson object:\n{schema}",
        shape = lesson_shape(category),
        schema = LESSON_SCHEMA.as_str(),
    );
    PromptSpec {
        system: LESSON_SYSTEM_PROMPT.to_string(),
        user,
    }
}
