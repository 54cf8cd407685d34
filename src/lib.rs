//! # Flashcard Generator
//!
//! 根据科目、考试类型、重点范围和题目数量，请求 LLM 生成题目，
//! 并渲染为问答卡片、单选题、判断题或 markdown 表格
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `LlmClient`，一次 POST，取出 `message.content`
//!
//! ### ② 业务能力层（Services）
//! - `PromptBuilder` - 拼装提示词和请求体
//! - `OutputFormat` - 输出格式策略（structured_items / markdown_document）
//!
//! ### ③ 流程层（Workflow）
//! - `GenerationFlow` - 一次生成：构建 → 调用 → 解释
//! - `ViewModel` - 界面状态机与 reducer
//!
//! ### ④ 编排层（Orchestration）
//! - `Session` - 持有视图模型，调度生成任务，取代过期请求
//! - `Command` - 终端命令解析
//!
//! ### ⑤ 渲染（Render）
//! - `render_page` - HTML 页面（maud）
//! - `render_view` - 终端视图

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{CompletionBackend, LlmClient};
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError};
pub use models::{AnswerValue, ExamType, GeneratedContent, Item, StudyForm};
pub use orchestrator::Session;
pub use workflow::{GenerationFlow, ViewModel};
