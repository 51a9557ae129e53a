use api_types::insight::{
    AdvisorChatReply, AdvisorChatRequest, AnalyzeRequest, AnalyzeResponse, ChatReply, ChatRequest,
    ConversationEntry, HistoryPage,
};

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Runs the analyzer for a period, optionally over caller-supplied
    /// transactions instead of whatever the backend has stored.
    pub async fn analyze_insights(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        self.post("insights/analyze", request).await
    }

    /// One-shot Q&A about the user's finances.
    pub async fn insight_chat(&self, message: &str) -> Result<ChatReply> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        self.post("insights/chat", &request).await
    }

    /// Previously generated analyses, newest first.
    pub async fn insight_history(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<HistoryPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.get_query("insights/history", &query).await
    }

    /// Free-form advisor conversation. The backend replays the whole
    /// updated history in its reply; pass it back on the next turn.
    pub async fn advisor_chat(
        &self,
        message: &str,
        history: Vec<ConversationEntry>,
    ) -> Result<AdvisorChatReply> {
        let request = AdvisorChatRequest {
            message: message.to_string(),
            conversation_history: history,
        };
        self.post("ai/chat", &request).await
    }
}
