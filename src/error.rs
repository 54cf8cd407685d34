use thiserror::Error;

use crate::models::ExamType;

/// 传输失败时展示给用户的通用提示
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to generate";
/// 模型输出无法解析为 JSON 时的提示
pub const INVALID_MODEL_OUTPUT_MESSAGE: &str = "Model did not return valid JSON";
/// 其他错误没有消息时的兜底提示
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 生成流程错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 表单输入错误
    #[error("表单错误: {0}")]
    Form(#[from] FormError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 一次生成过程中的错误
///
/// 三类错误在界面上的提示各不相同，见 [`GenerationError::user_message`]
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 请求未能完成，或返回了非 2xx 状态码
    #[error("请求 {endpoint} 失败: {detail}")]
    TransportFailure { endpoint: String, detail: String },
    /// 模型输出不是合法 JSON，或响应中取不到 `message.content`
    #[error("模型返回的内容不是合法 JSON: {source}")]
    InvalidModelOutput {
        #[source]
        source: serde_json::Error,
    },
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    /// 转换为界面上显示的提示文本
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::TransportFailure { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
            GenerationError::InvalidModelOutput { .. } => INVALID_MODEL_OUTPUT_MESSAGE.to_string(),
            GenerationError::Other(msg) if msg.trim().is_empty() => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
            GenerationError::Other(msg) => msg.clone(),
        }
    }

    pub fn transport(endpoint: impl Into<String>, detail: impl ToString) -> Self {
        GenerationError::TransportFailure {
            endpoint: endpoint.into(),
            detail: detail.to_string(),
        }
    }
}

/// 表单边界校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// 题目数量必须是正整数
    #[error("题目数量必须是正整数: '{input}'")]
    InvalidCardCount { input: String },
    /// 未知的考试类型
    #[error("未知的考试类型: '{input}' (可选: flashcards, multiple-choice, true-false)")]
    UnknownExamType { input: String },
    /// 选项编号超出范围
    #[error("题目 {item} 没有第 {option} 个选项")]
    OptionOutOfRange { item: usize, option: usize },
    /// 当前考试类型不显示选项
    #[error("{exam_type} 题型没有可选择的选项")]
    NotChoiceExam { exam_type: ExamType },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
