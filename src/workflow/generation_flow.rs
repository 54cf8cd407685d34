//! 生成流程 - 流程层
//!
//! 核心职责：定义"一次生成"的完整处理流程
//!
//! 流程顺序：
//! 1. 表单快照 → 构建请求
//! 2. 调用补全接口 → 取出 `message.content`
//! 3. 按输出格式解释文本

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::{ChatRequest, CompletionBackend};
use crate::config::Config;
use crate::error::GenerationError;
use crate::models::{GeneratedContent, StudyForm};
use crate::services::PromptBuilder;
use crate::utils::logging::truncate_text;

/// 生成流程
///
/// - 不持有界面状态
/// - 不关心请求是否已被新请求取代
pub struct GenerationFlow {
    builder: PromptBuilder,
    backend: Arc<dyn CompletionBackend>,
}

impl GenerationFlow {
    pub fn new(config: &Config, backend: Arc<dyn CompletionBackend>) -> Self {
        Self::with_builder(PromptBuilder::new(config), backend)
    }

    pub fn with_builder(builder: PromptBuilder, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { builder, backend }
    }

    pub fn build_request(&self, form: &StudyForm) -> ChatRequest {
        self.builder.build_request(form)
    }

    pub async fn run(&self, form: &StudyForm) -> Result<GeneratedContent, GenerationError> {
        let request = self.build_request(form);
        info!(
            "🤖 请求生成 {} 道 {} 题目 (科目: {}, 格式: {})",
            form.num_cards,
            form.exam_type,
            truncate_text(&form.subject, 40),
            self.builder.output_format()
        );

        let text = self.backend.complete(&request).await?;

        let content = self
            .builder
            .output_format()
            .strategy()
            .interpret(&text)
            .inspect_err(|e| warn!("⚠️ 无法解释模型输出: {}", e))?;

        if let GeneratedContent::Items(items) = &content {
            if items.len() != form.num_cards.get() as usize {
                info!(
                    "模型返回 {} 道题目（请求 {} 道）",
                    items.len(),
                    form.num_cards
                );
            }
        }

        Ok(content)
    }
}
