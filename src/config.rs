use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::DEFAULT_NUM_CARDS;
use crate::services::OutputFormat;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "FLASHCARD_CONFIG";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    /// chat-completion 接口地址
    pub llm_api_url: String,
    pub llm_model_name: String,
    /// 输出格式策略（structured_items / markdown_document）
    pub output_format: OutputFormat,
    /// 表单中题目数量的初始值
    pub default_num_cards: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 每次渲染后写出的 HTML 页面
    pub output_html_file: String,
    /// 会话日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_url: "https://ollama.utahtech.dev/api/chat".to_string(),
            llm_model_name: "gpt-oss:120b".to_string(),
            output_format: OutputFormat::StructuredItems,
            default_num_cards: DEFAULT_NUM_CARDS.get(),
            verbose_logging: false,
            output_html_file: "flashcards.html".to_string(),
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：若设置了 `FLASHCARD_CONFIG` 则先读 TOML 文件，环境变量始终最后覆盖
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// 同 [`Config::load`]，变量由 `lookup` 提供
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = match lookup(CONFIG_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        Ok(base.with_overrides(lookup))
    }

    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 无法解析的取值保留原值
    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            llm_api_url: lookup("LLM_API_URL").unwrap_or(self.llm_api_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            output_format: lookup("OUTPUT_FORMAT").and_then(|v| v.parse().ok()).unwrap_or(self.output_format),
            default_num_cards: lookup("DEFAULT_NUM_CARDS").and_then(|v| v.trim().parse().ok()).filter(|n| *n > 0).unwrap_or(self.default_num_cards),
            verbose_logging: lookup("VERBOSE_LOGGING").as_deref().and_then(parse_flag).unwrap_or(self.verbose_logging),
            output_html_file: lookup("OUTPUT_HTML_FILE").unwrap_or(self.output_html_file),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }
}

/// 开关型变量：1/0、true/false、yes/no、on/off，不区分大小写
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
