//! Advice service: every language-model interaction the app offers.
//!
//! Four slots (dashboard assistant, insights panel, chat, outline), each
//! allowing one in-flight request at a time. Slot content and the chat
//! transcript live in [`AdviceState`]; both are touched only when a
//! response arrives, so a failed call leaves the previous content and the
//! conversation exactly as they were.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{error, info};

use crate::backend::ai::{outline, prompts, LanguageModel};
use crate::backend::domain::models::{
    AdviceSlot, AdviceState, ChatMessage, ChatRole, FinancialData, OutlineReport, RiskProfile,
};

#[derive(Debug, Error)]
pub enum AdviceError {
    /// A request for this slot is still outstanding; the new one was not
    /// issued at all.
    #[error("an advice request is already in flight for this slot")]
    SlotBusy,
    #[error("the question must not be empty")]
    EmptyQuery,
    /// The language-model collaborator failed. Prior content is retained.
    #[error("advice generation failed: {0}")]
    Generation(anyhow::Error),
}

/// Releases the slot when the request finishes, success or not.
struct SlotGuard {
    slots: Arc<Mutex<HashSet<AdviceSlot>>>,
    slot: AdviceSlot,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.slots
            .lock()
            .expect("slot lock poisoned")
            .remove(&self.slot);
    }
}

pub struct AdviceService<M: LanguageModel> {
    model: Arc<M>,
    in_flight: Arc<Mutex<HashSet<AdviceSlot>>>,
}

impl<M: LanguageModel> Clone for AdviceService<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<M: LanguageModel> AdviceService<M> {
    pub fn new(model: M) -> Self {
        Self {
            model: Arc::new(model),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether a request for this slot is currently outstanding. This is
    /// what a UI polls for its loading state.
    pub fn is_busy(&self, slot: AdviceSlot) -> bool {
        self.in_flight
            .lock()
            .expect("slot lock poisoned")
            .contains(&slot)
    }

    fn acquire(&self, slot: AdviceSlot) -> Result<SlotGuard, AdviceError> {
        let mut slots = self.in_flight.lock().expect("slot lock poisoned");
        if !slots.insert(slot) {
            return Err(AdviceError::SlotBusy);
        }
        Ok(SlotGuard {
            slots: Arc::clone(&self.in_flight),
            slot,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        self.model.generate(prompt).await.map_err(|err| {
            error!(%err, "language-model call failed");
            AdviceError::Generation(err)
        })
    }

    /// One-shot Q&A for the dashboard assistant.
    pub async fn ask_assistant(
        &self,
        state: &mut AdviceState,
        data: &FinancialData,
        query: &str,
    ) -> Result<String, AdviceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AdviceError::EmptyQuery);
        }
        let _guard = self.acquire(AdviceSlot::Assistant)?;
        let text = self
            .generate(&prompts::financial_advice(query, data))
            .await?;
        info!("assistant answer received");
        state.assistant = Some(text.clone());
        Ok(text)
    }

    /// Spending-pattern insights for the dashboard panel.
    pub async fn generate_insights(
        &self,
        state: &mut AdviceState,
        data: &FinancialData,
    ) -> Result<String, AdviceError> {
        let _guard = self.acquire(AdviceSlot::Insights)?;
        let text = self
            .generate(&prompts::spending_analysis(&data.transactions))
            .await?;
        info!("insights received");
        state.insights = Some(text.clone());
        Ok(text)
    }

    /// Generate the personalized financial outline. Resets the chat and
    /// seeds it with the outline as the first model turn; any embedded
    /// allocation block is extracted for the chart.
    pub async fn generate_outline(
        &self,
        state: &mut AdviceState,
        data: &FinancialData,
        risk: RiskProfile,
    ) -> Result<OutlineReport, AdviceError> {
        let _guard = self.acquire(AdviceSlot::Outline)?;
        let raw = self
            .generate(&prompts::financial_outline(data, risk))
            .await?;
        let report = outline::parse_outline(&raw);
        info!(
            has_allocation = report.allocation.is_some(),
            "outline received"
        );
        state.chat.clear();
        state.chat.push(ChatMessage {
            role: ChatRole::Model,
            text: report.text.clone(),
        });
        state.outline = Some(report.clone());
        Ok(report)
    }

    /// One chat turn. The user message and the reply are appended together
    /// when the reply arrives, in arrival order; a failed turn leaves the
    /// transcript untouched.
    pub async fn send_chat_message(
        &self,
        state: &mut AdviceState,
        data: &FinancialData,
        message: &str,
    ) -> Result<String, AdviceError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AdviceError::EmptyQuery);
        }
        let _guard = self.acquire(AdviceSlot::Chat)?;

        let mut history = state.chat.clone();
        history.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
        });
        let reply = self.generate(&prompts::chat_turn(&history, data)).await?;

        state.chat.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
        });
        state.chat.push(ChatMessage {
            role: ChatRole::Model,
            text: reply.clone(),
        });
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::seed::seed_data;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::{oneshot, Notify};

    /// Replies with a fixed string per call, in order.
    struct ScriptedModel {
        replies: StdMutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: StdMutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            self.replies
                .lock()
                .expect("script lock")
                .pop()
                .ok_or_else(|| anyhow!("script exhausted"))
        }
    }

    struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Err(anyhow!("model unavailable"))
        }
    }

    /// Signals when the first request starts and holds it until released;
    /// later requests answer immediately.
    struct BlockingModel {
        started: StdMutex<Option<oneshot::Sender<()>>>,
        release: Arc<Notify>,
    }

    impl BlockingModel {
        fn new() -> (Self, oneshot::Receiver<()>, Arc<Notify>) {
            let (started_tx, started_rx) = oneshot::channel();
            let release = Arc::new(Notify::new());
            (
                Self {
                    started: StdMutex::new(Some(started_tx)),
                    release: Arc::clone(&release),
                },
                started_rx,
                release,
            )
        }
    }

    #[async_trait]
    impl LanguageModel for BlockingModel {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            let first = self.started.lock().expect("start lock").take();
            match first {
                Some(tx) => {
                    let _ = tx.send(());
                    self.release.notified().await;
                    Ok("slow answer".to_string())
                }
                None => Ok("quick answer".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn assistant_answer_lands_in_its_slot() {
        let service = AdviceService::new(ScriptedModel::new(&["Spend less on delivery."]));
        let mut state = AdviceState::default();
        let data = seed_data();

        let answer = service
            .ask_assistant(&mut state, &data, "Where does my money go?")
            .await
            .unwrap();
        assert_eq!(answer, "Spend less on delivery.");
        assert_eq!(state.assistant.as_deref(), Some("Spend less on delivery."));
        assert!(state.insights.is_none());
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_request() {
        let service = AdviceService::new(ScriptedModel::new(&[]));
        let mut state = AdviceState::default();
        let data = seed_data();
        let err = service
            .ask_assistant(&mut state, &data, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, AdviceError::EmptyQuery));
    }

    #[tokio::test]
    async fn failure_keeps_prior_content() {
        let service = AdviceService::new(FailingModel);
        let mut state = AdviceState {
            insights: Some("old insights".to_string()),
            ..AdviceState::default()
        };
        let data = seed_data();

        let err = service
            .generate_insights(&mut state, &data)
            .await
            .unwrap_err();
        assert!(matches!(err, AdviceError::Generation(_)));
        assert_eq!(state.insights.as_deref(), Some("old insights"));
    }

    #[tokio::test]
    async fn second_request_for_a_busy_slot_is_rejected() {
        let (model, started, release) = BlockingModel::new();
        let service = AdviceService::new(model);
        let data = seed_data();

        let background = {
            let service = service.clone();
            let data = data.clone();
            tokio::spawn(async move {
                let mut state = AdviceState::default();
                service.ask_assistant(&mut state, &data, "first").await
            })
        };
        started.await.expect("first request should start");
        assert!(service.is_busy(AdviceSlot::Assistant));
        assert!(!service.is_busy(AdviceSlot::Chat));

        let mut state = AdviceState::default();
        let err = service
            .ask_assistant(&mut state, &data, "second")
            .await
            .unwrap_err();
        assert!(matches!(err, AdviceError::SlotBusy));

        release.notify_one();
        let first = background.await.unwrap().unwrap();
        assert_eq!(first, "slow answer");

        // The slot is free again once the first request finished.
        let third = service
            .ask_assistant(&mut state, &data, "third")
            .await
            .unwrap();
        assert_eq!(third, "quick answer");
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let (model, started, release) = BlockingModel::new();
        let service = AdviceService::new(model);
        let data = seed_data();

        let background = {
            let service = service.clone();
            let data = data.clone();
            tokio::spawn(async move {
                let mut state = AdviceState::default();
                service.ask_assistant(&mut state, &data, "assistant").await
            })
        };
        started.await.expect("assistant request should start");

        // Insights uses a different slot, so it is admitted (and then
        // blocks on the same model; release both).
        let insights = {
            let service = service.clone();
            let data = data.clone();
            tokio::spawn(async move {
                let mut state = AdviceState::default();
                service.generate_insights(&mut state, &data).await
            })
        };
        release.notify_one();
        release.notify_one();
        assert!(background.await.unwrap().is_ok());
        assert!(insights.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn outline_resets_chat_and_extracts_allocation() {
        let raw = "## Plan\nBUDGET_JSON_START\
                   {\"needs\":{\"amount\":10000,\"percentage\":50},\
                    \"wants\":{\"amount\":6000,\"percentage\":30},\
                    \"savings\":{\"amount\":4000,\"percentage\":20}}\
                   BUDGET_JSON_END\nFollow it.";
        let service = AdviceService::new(ScriptedModel::new(&[raw]));
        let mut state = AdviceState {
            chat: vec![ChatMessage {
                role: ChatRole::User,
                text: "stale turn".to_string(),
            }],
            ..AdviceState::default()
        };
        let data = seed_data();

        let report = service
            .generate_outline(&mut state, &data, RiskProfile::Normal)
            .await
            .unwrap();
        assert!(report.allocation.is_some());
        assert!(!report.text.contains("BUDGET_JSON"));
        assert_eq!(state.chat.len(), 1);
        assert_eq!(state.chat[0].role, ChatRole::Model);
        assert_eq!(state.outline.as_ref().unwrap().text, report.text);
    }

    #[tokio::test]
    async fn chat_turns_append_in_arrival_order() {
        let service = AdviceService::new(ScriptedModel::new(&["first reply", "second reply"]));
        let mut state = AdviceState::default();
        let data = seed_data();

        service
            .send_chat_message(&mut state, &data, "hello")
            .await
            .unwrap();
        service
            .send_chat_message(&mut state, &data, "more detail please")
            .await
            .unwrap();

        let transcript: Vec<(ChatRole, &str)> = state
            .chat
            .iter()
            .map(|m| (m.role, m.text.as_str()))
            .collect();
        assert_eq!(
            transcript,
            vec![
                (ChatRole::User, "hello"),
                (ChatRole::Model, "first reply"),
                (ChatRole::User, "more detail please"),
                (ChatRole::Model, "second reply"),
            ]
        );
    }

    #[tokio::test]
    async fn failed_chat_turn_leaves_the_transcript_alone() {
        let service = AdviceService::new(FailingModel);
        let mut state = AdviceState::default();
        let data = seed_data();

        assert!(service
            .send_chat_message(&mut state, &data, "hello")
            .await
            .is_err());
        assert!(state.chat.is_empty());
    }
}
