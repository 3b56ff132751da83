//! Inline-choice quiz. `/quiz` starts (or restarts) a run for the caller; each button press is
//! scored, the question message is edited with feedback, and the next question is sent.
//! Progress lives in memory only.

use async_trait::async_trait;
use churchbot_core::{
    Bot, CallbackHandler, CallbackQuery, ChoiceButton, Command, Handler, HandlerResponse, Result,
};
use churchbot_storage::{read_file, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::replies;

pub const QUIZ_QUESTIONS_FILE: &str = "quiz_questions.json";

/// Callback payloads, one per choice position.
pub const QUIZ_LABELS: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub choices: Vec<String>,
    /// Label of the correct choice, e.g. `"C"`.
    pub answer: String,
}

impl QuizQuestion {
    fn buttons(&self) -> Vec<ChoiceButton> {
        self.choices
            .iter()
            .enumerate()
            .map(|(i, choice)| ChoiceButton {
                label: choice.clone(),
                payload: QUIZ_LABELS
                    .get(i)
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| i.to_string()),
            })
            .collect()
    }
}

/// Built-in questions used when no question file exists.
pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            question: "Who created the heavens and the earth?".to_string(),
            choices: vec![
                "A. Moses".to_string(),
                "B. Abraham".to_string(),
                "C. God".to_string(),
                "D. David".to_string(),
            ],
            answer: "C".to_string(),
        },
        QuizQuestion {
            question: "Who built the ark?".to_string(),
            choices: vec![
                "A. Noah".to_string(),
                "B. Moses".to_string(),
                "C. Abraham".to_string(),
                "D. Jacob".to_string(),
            ],
            answer: "A".to_string(),
        },
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizProgress {
    pub index: usize,
    pub score: usize,
}

pub struct QuizHandler {
    bot: Arc<dyn Bot>,
    questions: Vec<QuizQuestion>,
    progress: Mutex<HashMap<i64, QuizProgress>>,
}

impl QuizHandler {
    pub fn new(bot: Arc<dyn Bot>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            bot,
            questions,
            progress: Mutex::new(HashMap::new()),
        }
    }

    /// Loads `quiz_questions.json` from `data_dir`. A missing file gives the built-in questions;
    /// an unreadable one gives no questions.
    pub async fn load(bot: Arc<dyn Bot>, data_dir: &Path) -> Self {
        let path = data_dir.join(QUIZ_QUESTIONS_FILE);
        let questions = match read_file::<QuizQuestion>(&path).await {
            Ok(questions) => {
                info!(count = questions.len(), "Loaded quiz questions");
                questions
            }
            Err(StorageError::NotFound(_)) => default_questions(),
            Err(e) => {
                warn!(error = %e, "Failed to load quiz questions; quiz disabled");
                Vec::new()
            }
        };
        Self::new(bot, questions)
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub async fn progress_of(&self, user_id: i64) -> Option<QuizProgress> {
        self.progress.lock().await.get(&user_id).copied()
    }

    async fn send_question(&self, chat_id: i64, index: usize) -> Result<()> {
        let q = &self.questions[index];
        self.bot
            .send_choices(chat_id, &q.question, &q.buttons())
            .await
    }
}

#[async_trait]
impl Handler for QuizHandler {
    #[instrument(skip(self, command))]
    async fn handle(&self, command: &Command) -> Result<HandlerResponse> {
        if self.questions.is_empty() {
            return Ok(HandlerResponse::Reply(replies::QUIZ_EMPTY.to_string()));
        }
        self.progress
            .lock()
            .await
            .insert(command.message.user.id, QuizProgress::default());
        info!(user_id = command.message.user.id, "Quiz started");
        self.send_question(command.chat_id(), 0).await?;
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl CallbackHandler for QuizHandler {
    #[instrument(skip(self, query), fields(choice = %query.data))]
    async fn handle(&self, query: &CallbackQuery) -> Result<()> {
        let Some(chat) = query.chat.as_ref() else {
            debug!(user_id = query.user.id, "Quiz answer without a chat; ignored");
            return Ok(());
        };
        let user_id = query.user.id;
        let choice = query.data.as_str();

        let answered = {
            let mut progress = self.progress.lock().await;
            match progress.get_mut(&user_id) {
                Some(state) if state.index < self.questions.len() => {
                    let question = &self.questions[state.index];
                    let feedback = if choice == question.answer {
                        state.score += 1;
                        replies::quiz_correct(choice)
                    } else {
                        replies::quiz_wrong(choice, &question.answer)
                    };
                    state.index += 1;
                    let next = *state;
                    if next.index >= self.questions.len() {
                        progress.remove(&user_id);
                    }
                    Some((feedback, next))
                }
                _ => None,
            }
        };

        let Some((feedback, next)) = answered else {
            debug!(user_id, "No quiz in progress");
            if let Some(message_id) = query.message_id.as_deref() {
                self.bot
                    .edit_message(chat.id, message_id, replies::QUIZ_FINISHED_ALREADY)
                    .await?;
            }
            return Ok(());
        };

        if let Some(message_id) = query.message_id.as_deref() {
            if let Err(e) = self.bot.edit_message(chat.id, message_id, &feedback).await {
                warn!(error = %e, user_id, "Failed to edit quiz feedback");
            }
        }

        if next.index < self.questions.len() {
            self.send_question(chat.id, next.index).await
        } else {
            info!(user_id, score = next.score, total = self.questions.len(), "Quiz finished");
            self.bot
                .send_message(
                    chat.id,
                    &replies::quiz_finished(next.score, self.questions.len()),
                )
                .await
        }
    }
}
