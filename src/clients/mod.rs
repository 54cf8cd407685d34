pub mod llm_client;

pub use llm_client::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, CompletionBackend, LlmClient,
};
