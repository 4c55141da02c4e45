//! Types for AI-generated advice: chat turns, slots, and the parsed
//! budget-allocation block an outline response may embed.

use serde::{Deserialize, Serialize};

/// Investment style the user selects before generating a financial outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Low,
    Normal,
    High,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Low => "low",
            RiskProfile::Normal => "normal",
            RiskProfile::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the advice chat. Turns are appended in arrival order and
/// never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// One advice "slot". Each slot allows a single in-flight language-model
/// request at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceSlot {
    Assistant,
    Insights,
    Chat,
    Outline,
}

/// One slice of the needs/wants/savings allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub amount: f64,
    pub percentage: f64,
}

/// The machine-parseable allocation a financial-outline response embeds
/// between `BUDGET_JSON_START` / `BUDGET_JSON_END` markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub needs: AllocationSlice,
    pub wants: AllocationSlice,
    pub savings: AllocationSlice,
}

/// A financial outline: the prose with any sentinel block stripped, plus
/// the allocation if its JSON parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineReport {
    pub text: String,
    pub allocation: Option<BudgetAllocation>,
}

/// All advice content the app holds, one field per slot. Prior content is
/// retained when a request fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdviceState {
    pub assistant: Option<String>,
    pub insights: Option<String>,
    pub outline: Option<OutlineReport>,
    pub chat: Vec<ChatMessage>,
}
