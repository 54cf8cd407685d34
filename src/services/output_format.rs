//! 输出格式策略 - 业务能力层
//!
//! 每种策略自带系统提示词和对应的解析方式，由配置项 `output_format` 选择

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::GenerationError;
use crate::models::{GeneratedContent, Item};

const STRUCTURED_SYSTEM_PROMPT: &str = "You are a tutor. Respond ONLY in valid JSON.
If exam type = flashcards: return an array of {question, answer}.
If exam type = multiple-choice: return an array of {question, options:[], answer}.
If exam type = true-false: return an array of {question, options:[true,false], answer:true|false}.";

const MARKDOWN_SYSTEM_PROMPT: &str = "You are a tutor. Always output the flashcards as a markdown table \
with one column for the question and one column for the answer, whatever exam type is requested. \
Do not add any text outside the table.";

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// 模型返回 JSON 数组，解析为题目列表
    #[default]
    StructuredItems,
    /// 模型返回 markdown 表格，原样保存
    MarkdownDocument,
}

impl OutputFormat {
    /// 获取该格式对应的策略
    pub fn strategy(self) -> &'static dyn OutputStrategy {
        match self {
            OutputFormat::StructuredItems => &StructuredItems,
            OutputFormat::MarkdownDocument => &MarkdownDocument,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::StructuredItems => "structured_items",
            OutputFormat::MarkdownDocument => "markdown_document",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured_items" | "structured" | "json" => Ok(OutputFormat::StructuredItems),
            "markdown_document" | "markdown" | "md" => Ok(OutputFormat::MarkdownDocument),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 输出格式策略
pub trait OutputStrategy: Send + Sync {
    /// 发送给模型的系统提示词
    fn system_prompt(&self) -> &'static str;

    /// 把助手消息文本解释为生成结果
    fn interpret(&self, text: &str) -> Result<GeneratedContent, GenerationError>;
}

/// JSON 题目列表策略
pub struct StructuredItems;

impl OutputStrategy for StructuredItems {
    fn system_prompt(&self) -> &'static str {
        STRUCTURED_SYSTEM_PROMPT
    }

    /// 只做 JSON 解析，不尝试修复格式错误的输出
    fn interpret(&self, text: &str) -> Result<GeneratedContent, GenerationError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|source| GenerationError::InvalidModelOutput { source })?;

        let items: Vec<Item> = serde_json::from_value(value).map_err(|e| {
            GenerationError::Other(format!("Model returned JSON in an unexpected shape: {}", e))
        })?;

        debug!("解析得到 {} 道题目", items.len());
        Ok(GeneratedContent::Items(items))
    }
}

/// markdown 文档策略
pub struct MarkdownDocument;

impl OutputStrategy for MarkdownDocument {
    fn system_prompt(&self) -> &'static str {
        MARKDOWN_SYSTEM_PROMPT
    }

    fn interpret(&self, text: &str) -> Result<GeneratedContent, GenerationError> {
        Ok(GeneratedContent::Markdown(text.to_string()))
    }
}
