use serde::{Deserialize, Serialize};

use super::category::Difficulty;

pub const QUESTION_COUNT_CHOICES: [u32; 4] = [5, 10, 15, 20];
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    pub difficulty: Difficulty,
}
