//! 请求构建 - 业务能力层
//!
//! 只负责把表单快照拼成提示词和请求体，不做任何输入校验

use crate::clients::{ChatMessage, ChatRequest};
use crate::config::Config;
use crate::models::StudyForm;
use crate::services::OutputFormat;

/// 请求构建器
pub struct PromptBuilder {
    model_name: String,
    output_format: OutputFormat,
}

impl PromptBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            model_name: config.llm_model_name.clone(),
            output_format: config.output_format,
        }
    }

    pub fn with_format(model_name: impl Into<String>, output_format: OutputFormat) -> Self {
        Self {
            model_name: model_name.into(),
            output_format,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// 构建消息
    ///
    /// 返回 (user_message, system_message)
    pub fn build_messages(&self, form: &StudyForm) -> (String, String) {
        let user_message = build_user_prompt(form);
        let system_message = self.output_format.strategy().system_prompt().to_string();
        (user_message, system_message)
    }

    /// 构建完整请求体（system + user 两条消息，非流式）
    pub fn build_request(&self, form: &StudyForm) -> ChatRequest {
        let (user_message, system_message) = self.build_messages(form);
        ChatRequest {
            messages: vec![
                ChatMessage::system(system_message),
                ChatMessage::user(user_message),
            ],
            model: self.model_name.clone(),
            stream: false,
        }
    }
}

/// 用户提示词，空字段原样插入
pub fn build_user_prompt(form: &StudyForm) -> String {
    format!(
        "Please make {} {} questions for a {} exam with a focus area of {}.",
        form.num_cards, form.exam_type, form.subject, form.focus_area
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ChatRole;
    use crate::models::{CardCount, ExamType};

    fn anatomy_form() -> StudyForm {
        StudyForm {
            subject: "Human Anatomy".to_string(),
            exam_type: ExamType::MultipleChoice,
            focus_area: "Muscular System".to_string(),
            num_cards: CardCount::new(7).unwrap(),
        }
    }

    #[test]
    fn test_user_prompt_embeds_every_field() {
        assert_eq!(
            build_user_prompt(&anatomy_form()),
            "Please make 7 multiple-choice questions for a Human Anatomy exam with a focus area of Muscular System."
        );
    }

    #[test]
    fn test_empty_fields_are_interpolated() {
        let form = StudyForm::default();
        assert_eq!(
            build_user_prompt(&form),
            "Please make 10 flashcards questions for a  exam with a focus area of ."
        );
    }

    #[test]
    fn test_request_has_system_then_user() {
        let builder = PromptBuilder::with_format("gpt-oss:120b", OutputFormat::StructuredItems);
        let request = builder.build_request(&anatomy_form());

        assert_eq!(request.model, "gpt-oss:120b");
        assert!(!request.stream);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.messages[1].role, ChatRole::User);

        let user = request.user_content().unwrap();
        assert!(user.contains("Human Anatomy"));
        assert!(user.contains("Muscular System"));
        assert!(user.contains('7'));
    }

    #[test]
    fn test_exam_type_only_changes_user_prompt_not_system_prompt() {
        let builder = PromptBuilder::with_format("m", OutputFormat::MarkdownDocument);
        let mut form = anatomy_form();
        let (_, system_mc) = builder.build_messages(&form);
        form.exam_type = ExamType::TrueFalse;
        let (user_tf, system_tf) = builder.build_messages(&form);

        assert_eq!(system_mc, system_tf);
        assert!(user_tf.contains("true-false"));
    }
}
