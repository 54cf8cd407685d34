//! LLM API 客户端
//!
//! 封装对 chat-completion 接口（Ollama `/api/chat` 格式）的单次调用

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::GenerationError;
use crate::utils::logging::truncate_text;

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// 请求体：`{ messages, model, stream: false }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub stream: bool,
}

impl ChatRequest {
    /// 取出用户消息内容
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }

    pub fn system_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }
}

/// 响应信封，只关心 `message.content`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

/// 补全后端
///
/// 生成流程只依赖这个能力；测试中用内存实现替换真实 HTTP 客户端
pub trait CompletionBackend: Send + Sync {
    /// 发送一次请求，返回助手消息的文本内容
    fn complete<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<String, GenerationError>>;
}

/// LLM 客户端
pub struct LlmClient {
    http: reqwest::Client,
    api_url: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        Self::with_url(config.llm_api_url.clone())
    }

    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 发送聊天请求
    ///
    /// 非 2xx 状态码一律视为传输失败，不区分具体状态码；不重试
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        debug!("正在调用 LLM API，模型: {}", request.model);

        let response = self
            .http
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                GenerationError::transport(&self.api_url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("LLM API 返回错误状态码: {}", status);
            return Err(GenerationError::transport(
                &self.api_url,
                format!("HTTP {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::transport(&self.api_url, e))?;

        debug!("LLM 原始响应: {}", truncate_text(&body, 500));

        // 缺少 message.content 时按模型输出无效处理
        let envelope: ChatResponse = serde_json::from_str(&body).map_err(|source| {
            warn!("LLM 响应缺少 message.content: {}", source);
            GenerationError::InvalidModelOutput { source }
        })?;

        debug!("LLM API 调用成功");

        Ok(envelope.message.content)
    }
}

impl CompletionBackend for LlmClient {
    fn complete<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        self.chat(request).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest {
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            model: "gpt-oss:120b".to_string(),
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "model": "gpt-oss:120b",
                "stream": false
            })
        );
        assert_eq!(request.user_content(), Some("hi"));
        assert_eq!(request.system_content(), Some("sys"));
    }

    #[test]
    fn test_response_envelope_ignores_extra_fields() {
        let body = r#"{
            "model": "gpt-oss:120b",
            "created_at": "2025-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "[]"},
            "done": true
        }"#;
        let envelope: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.message.content, "[]");
    }
}
