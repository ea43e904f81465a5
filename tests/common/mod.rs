#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{json, Value};

use qudurat_prep::{
    config::{Config, DEFAULT_HISTORY_LIMIT, DEFAULT_OPENAI_MODEL},
    errors::AppResult,
    services::{prompt_builder::PromptSpec, ChatCompletionGateway},
};

pub fn test_config() -> Config {
    Config {
        openai_api_key: SecretString::from("sk-test".to_string()),
        openai_api_base: None,
        openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        llm_timeout_secs: 5,
        strict_payloads: true,
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        history_limit: DEFAULT_HISTORY_LIMIT,
        api_url: "http://127.0.0.1:8080".to_string(),
        data_dir: PathBuf::from(".qudurat-test"),
        client_timeout_secs: 5,
    }
}

/// Gateway stub that replies with fixed content and remembers every prompt.
pub struct ScriptedGateway {
    reply: Option<String>,
    prompts: Mutex<Vec<PromptSpec>>,
}

impl ScriptedGateway {
    pub fn replying(value: &Value) -> Self {
        Self::with_content(Some(value.to_string()))
    }

    pub fn with_content(reply: Option<String>) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<PromptSpec> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletionGateway for ScriptedGateway {
    async fn complete_json(&self, prompt: &PromptSpec) -> AppResult<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.reply.clone())
    }
}

/// Five Odd One Out questions; the correct answer is always the first option.
pub fn odd_one_out_quiz() -> Value {
    let sets = [
        ["Carrot", "Apple", "Banana", "Mango"],
        ["Pen", "Lion", "Tiger", "Leopard"],
        ["Winter", "Monday", "Friday", "Sunday"],
        ["Copper", "Oak", "Pine", "Cedar"],
        ["Violin", "Hammer", "Saw", "Drill"],
    ];
    let questions: Vec<Value> = sets
        .iter()
        .enumerate()
        .map(|(i, options)| {
            json!({
                "id": i + 1,
                "type": "Odd One Out",
                "question_text": "Which word does not belong with the others?",
                "options": options,
                "correct_answer": options[0],
                "explanation": format!("{} is not in the same group.", options[0])
            })
        })
        .collect();
    json!({ "questions": questions })
}

pub fn analogy_lesson() -> Value {
    let item = |pair: &str, answer: &str| {
        json!({
            "base_pair": pair,
            "question": "Which pair shares the same relationship?",
            "options": [answer, "Sky : Blue", "Tree : Leaf", "Car : Road"],
            "correct_answer": answer,
            "explanation": "Both pairs share the same relationship."
        })
    };
    json!({
        "explanation": "State the relationship in the base pair, then test each option against it.",
        "common_tricks": ["Reversed order", "Related words with a different relationship"],
        "examples": [item("Hand : Glove", "Foot : Sock")],
        "practice": [
            item("Bird : Nest", "Bee : Hive"),
            item("Pen : Write", "Knife : Cut"),
        ]
    })
}
