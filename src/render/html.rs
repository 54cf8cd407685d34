//! HTML 渲染
//!
//! 根据视图模型生成完整页面：左侧表单快照，右侧结果区

use maud::{html, Markup, PreEscaped, DOCTYPE};
use pulldown_cmark::{Event, Options, Parser};

use crate::models::{ExamType, GeneratedContent, Item};
use crate::render::{NO_OPTIONS_TEXT, PLACEHOLDER_TEXT};
use crate::workflow::{OptionState, ViewModel};

const PAGE_STYLE: &str = "
body { font-family: sans-serif; background: #f3f4f6; margin: 0; }
.layout { display: flex; gap: 1.5rem; padding: 1.5rem; align-items: stretch; }
.panel { background: #fff; border-radius: 8px; padding: 1.5rem; box-shadow: 0 2px 6px rgba(0,0,0,.1); }
.form { width: 24rem; }
.results { flex: 1; overflow: auto; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.card { padding: 1rem; border: 1px solid #c7d2fe; border-radius: 8px; background: #eef2ff; }
.question { font-weight: bold; color: #3730a3; }
.options { list-style: none; padding: 0; }
.option { padding: .5rem .75rem; margin-bottom: .5rem; border: 1px solid #d1d5db; border-radius: 4px; }
.option.correct { background: #dcfce7; border-color: #22c55e; }
.option.incorrect { background: #fee2e2; border-color: #ef4444; }
.muted { color: #6b7280; }
.error { color: #ef4444; font-size: .875rem; }
table { border-collapse: collapse; }
th, td { border: 1px solid #d1d5db; padding: .5rem; }
";

/// 渲染完整页面
pub fn render_page(view: &ViewModel) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Generate Exam Questions" }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div class="layout" {
                    (form_panel(view))
                    div class="panel results" {
                        (result_panel(view))
                    }
                }
            }
        }
    }
}

fn form_panel(view: &ViewModel) -> Markup {
    let form = view.form();
    html! {
        div class="panel form" {
            h2 { "Generate Exam Questions" }
            label { "Subject" }
            input type="text" name="subject" value=(form.subject) placeholder="e.g. Human Anatomy" readonly;
            label { "Exam Type" }
            select name="exam_type" disabled {
                @for exam_type in ExamType::ALL {
                    option value=(exam_type.slug()) selected[exam_type == form.exam_type] {
                        (exam_type.label())
                    }
                }
            }
            label { "Focus Area" }
            input type="text" name="focus_area" value=(form.focus_area) placeholder="e.g. Muscular System" readonly;
            label { "Number of Questions" }
            input type="number" name="num_cards" value=(form.num_cards) min="1" readonly;
            button disabled[view.is_loading()] {
                @if view.is_loading() { "Generating..." } @else { "Generate" }
            }
            @if let Some(error) = view.error() {
                div class="error" { (error) }
            }
        }
    }
}

/// 结果区：空闲时显示占位文本，否则按当前考试类型选择渲染分支
pub fn result_panel(view: &ViewModel) -> Markup {
    let exam_type = view.form().exam_type;
    match view.content() {
        Some(content) if !content.is_empty() => html! {
            h3 { "Generated " (exam_type) ":" }
            @match content {
                GeneratedContent::Items(items) => {
                    @if exam_type.is_choice() {
                        (choice_view(view, items))
                    } @else {
                        (flashcard_view(items))
                    }
                }
                GeneratedContent::Markdown(text) => {
                    div class="markdown" { (PreEscaped(markdown_to_html(text))) }
                }
            }
        },
        _ => html! {
            p class="muted" { (PLACEHOLDER_TEXT) }
        },
    }
}

fn flashcard_view(items: &[Item]) -> Markup {
    html! {
        div class="grid" {
            @for (i, card) in items.iter().enumerate() {
                div class="card" {
                    p class="question" { "Q" (i + 1) ": " (card.question) }
                    p class="answer" { "A: " (card.answer) }
                }
            }
        }
    }
}

/// 单选题和判断题共用
fn choice_view(view: &ViewModel, items: &[Item]) -> Markup {
    html! {
        div class="choices" {
            @for (i, item) in items.iter().enumerate() {
                div class="panel item" {
                    p class="question" { (i + 1) ". " (item.question) }
                    @if let Some(options) = item.options() {
                        ul class="options" {
                            @for (j, opt) in options.iter().enumerate() {
                                li class=(option_class(view.option_state(i, opt)))
                                    data-item=(i) data-option=(j) {
                                    (opt)
                                }
                            }
                        }
                    } @else {
                        p class="muted" { (NO_OPTIONS_TEXT) }
                    }
                }
            }
        }
    }
}

fn option_class(state: OptionState) -> &'static str {
    match state {
        OptionState::Neutral => "option",
        OptionState::Correct => "option selected correct",
        OptionState::Incorrect => "option selected incorrect",
    }
}

/// markdown 转 HTML；内嵌的原始 HTML 按文本转义输出
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    pulldown_cmark::html::push_html(&mut out, parser);
    out
}
