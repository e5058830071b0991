//! Follow-up Q&A session over the Gemini client
//!
//! Strictly sequential: each turn replays a bounded window of the most
//! recent exchanges verbatim ahead of the new question.

use crate::models::FeatureRecord;
use anyhow::Result;
use std::collections::VecDeque;

use super::GeminiClient;

/// Number of past exchanges replayed into each prompt
const HISTORY_WINDOW: usize = 6;

/// One sequential follow-up conversation
pub struct ChatSession {
    client: GeminiClient,
    history: VecDeque<(String, String)>,
    context: String,
}

impl ChatSession {
    /// Start a session anchored to the advisory the user just received
    #[must_use]
    pub fn new(client: GeminiClient, features: &FeatureRecord) -> Self {
        Self {
            client,
            history: VecDeque::new(),
            context: format!(
                "You are a helpful agronomy assistant. The user was just advised about \
                 planting {} on {} (pH {}, rainfall {}mm, temperature {}C). \
                 Answer follow-up questions briefly and practically.",
                features.tree,
                features.soil,
                features.ph,
                features.rainfall_mm,
                features.temperature_c
            ),
        }
    }

    /// Ask one question; the answer is appended to the history window
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let prompt = build_chat_prompt(&self.context, self.history.iter(), question);
        let answer = self.client.generate(&prompt).await?;

        self.history
            .push_back((question.to_string(), answer.clone()));
        while self.history.len() > HISTORY_WINDOW {
            self.history.pop_front();
        }

        Ok(answer)
    }

    /// Number of exchanges currently retained
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// Concatenate context, replayed history and the new question into a
/// one-shot prompt
fn build_chat_prompt<'a>(
    context: &str,
    history: impl Iterator<Item = &'a (String, String)>,
    question: &str,
) -> String {
    let mut prompt = String::new();
    if !context.is_empty() {
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }
    for (user, assistant) in history {
        prompt.push_str(&format!("User: {user}\nAssistant: {assistant}\n"));
    }
    prompt.push_str(&format!("User: {question}\nAssistant:"));
    prompt
}
