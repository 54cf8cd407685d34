pub mod output_format;
pub mod prompt_builder;

pub use output_format::{MarkdownDocument, OutputFormat, OutputStrategy, StructuredItems};
pub use prompt_builder::{build_user_prompt, PromptBuilder};
