pub mod html;
pub mod terminal;

pub use html::{markdown_to_html, render_page};
pub use terminal::render_view;

/// 尚无结果时的占位文本
pub const PLACEHOLDER_TEXT: &str = "Questions will appear here after generation.";
/// 选项缺失或不是数组时的兜底文本
pub const NO_OPTIONS_TEXT: &str = "No options provided";
