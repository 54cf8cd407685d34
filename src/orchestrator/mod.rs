//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app (终端命令循环 / 页面输出)
//!     ↓
//! orchestrator::Session (状态所有者，调度与取代请求)
//!     ↓
//! workflow::GenerationFlow (处理单次生成)
//!     ↓
//! services (能力层：prompt / output format)
//!     ↓
//! clients (LlmClient)
//! ```

pub mod command;
pub mod session;

pub use command::Command;
pub use session::Session;
