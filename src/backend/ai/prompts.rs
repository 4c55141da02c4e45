//! Prompt builders for the language-model collaborator.
//!
//! Every prompt embeds a snapshot of the user's financial data serialized
//! as JSON, framed for an Indian user with amounts in INR, and asks for a
//! markdown-formatted answer.

use crate::backend::domain::models::{
    ChatMessage, ChatRole, FinancialData, RiskProfile, Transaction, TransactionKind,
};

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

/// The ten most recent transactions, newest first.
fn recent_transactions(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut recent: Vec<Transaction> = transactions.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(10);
    recent
}

/// Personalized Q&A for the dashboard assistant.
pub fn financial_advice(query: &str, data: &FinancialData) -> String {
    format!(
        "You are a friendly and helpful financial assistant for a user in India.\n\
         Analyze the user's financial data and their question to provide personalized advice.\n\
         All monetary values are in Indian Rupees (INR).\n\n\
         User's Financial Data:\n\
         - Recent Transactions: {}\n\
         - Budgets: {}\n\
         - Financial Goals: {}\n\n\
         User's Question: \"{}\"\n\n\
         Please provide a concise and actionable response. Use markdown for formatting.",
        to_json(&recent_transactions(&data.transactions)),
        to_json(&data.budgets),
        to_json(&data.goals),
        query,
    )
}

/// Spending-pattern analysis over the expense rows only.
pub fn spending_analysis(transactions: &[Transaction]) -> String {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .collect();
    format!(
        "You are an expert financial analyst. Analyze the following list of transactions (in INR) from an Indian user.\n\
         Provide a brief summary of their spending patterns.\n\
         Identify the top 3 spending categories.\n\
         Suggest 2-3 specific and actionable ways they could save money based on their habits.\n\
         Keep the analysis concise and easy to understand. Use markdown for formatting, like using bullet points.\n\n\
         Transactions:\n{}",
        to_json(&expenses),
    )
}

/// The personalized financial-outline request. Instructs the model to embed
/// the machine-parseable needs/wants/savings block the outline parser
/// extracts.
pub fn financial_outline(data: &FinancialData, risk: RiskProfile) -> String {
    format!(
        "You are a certified financial planner advising a user in India. All amounts are in Indian Rupees (INR).\n\
         Create a personalized financial outline for the user below. Their chosen risk profile is \"{}\".\n\n\
         User's Financial Data:\n\
         - Transactions: {}\n\
         - Budgets: {}\n\
         - Financial Goals: {}\n\n\
         Structure the plan in markdown with sections for budgeting, goal funding, and investing suited to the\n\
         risk profile. Split the user's monthly income into needs, wants, and savings, and embed that split as a\n\
         machine-readable block, exactly once, in this form:\n\
         BUDGET_JSON_START\n\
         {{\"needs\": {{\"amount\": 0, \"percentage\": 0}}, \"wants\": {{\"amount\": 0, \"percentage\": 0}}, \"savings\": {{\"amount\": 0, \"percentage\": 0}}}}\n\
         BUDGET_JSON_END\n\
         Do not mention the block in the prose.",
        risk.as_str(),
        to_json(&data.transactions),
        to_json(&data.budgets),
        to_json(&data.goals),
    )
}

/// A follow-up chat turn: the whole conversation so far plus the snapshot.
pub fn chat_turn(history: &[ChatMessage], data: &FinancialData) -> String {
    let mut transcript = String::new();
    for message in history {
        let speaker = match message.role {
            ChatRole::User => "User",
            ChatRole::Model => "Assistant",
        };
        transcript.push_str(speaker);
        transcript.push_str(": ");
        transcript.push_str(&message.text);
        transcript.push('\n');
    }
    format!(
        "You are a financial assistant continuing a conversation with a user in India (amounts in INR).\n\
         Their financial data:\n\
         - Transactions: {}\n\
         - Budgets: {}\n\
         - Financial Goals: {}\n\n\
         Conversation so far:\n{}\n\
         Reply to the user's latest message. Be concise and use markdown.",
        to_json(&data.transactions),
        to_json(&data.budgets),
        to_json(&data.goals),
        transcript,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::seed::seed_data;

    #[test]
    fn advice_prompt_includes_question_and_only_recent_rows() {
        let data = seed_data();
        let prompt = financial_advice("Can I afford a new phone?", &data);
        assert!(prompt.contains("Can I afford a new phone?"));
        // 14 seed rows, but only the 10 most recent make the prompt.
        assert!(prompt.contains("Textbooks for Semester"));
        assert!(!prompt.contains("Monthly Allowance from Parents"));
    }

    #[test]
    fn spending_prompt_excludes_income_rows() {
        let data = seed_data();
        let prompt = spending_analysis(&data.transactions);
        assert!(!prompt.contains("Monthly Allowance from Parents"));
        assert!(prompt.contains("Hostel & Mess Fees"));
    }

    #[test]
    fn outline_prompt_carries_risk_profile_and_sentinels() {
        let data = seed_data();
        let prompt = financial_outline(&data, RiskProfile::High);
        assert!(prompt.contains("\"high\""));
        assert!(prompt.contains("BUDGET_JSON_START"));
        assert!(prompt.contains("BUDGET_JSON_END"));
    }

    #[test]
    fn chat_prompt_renders_turns_in_order() {
        let data = seed_data();
        let history = vec![
            ChatMessage {
                role: ChatRole::User,
                text: "How do I save more?".to_string(),
            },
            ChatMessage {
                role: ChatRole::Model,
                text: "Cut delivery orders.".to_string(),
            },
        ];
        let prompt = chat_turn(&history, &data);
        let user_at = prompt.find("User: How do I save more?").unwrap();
        let model_at = prompt.find("Assistant: Cut delivery orders.").unwrap();
        assert!(user_at < model_at);
    }
}
