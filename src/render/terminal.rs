//! 终端渲染，与 HTML 页面结构一致

use std::fmt::Write;

use crate::models::{GeneratedContent, Item};
use crate::render::{NO_OPTIONS_TEXT, PLACEHOLDER_TEXT};
use crate::workflow::{OptionState, ViewModel};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();
    let form = view.form();

    let _ = writeln!(
        out,
        "{DIM}subject: {} | type: {} | focus: {} | count: {}{RESET}",
        form.subject, form.exam_type, form.focus_area, form.num_cards
    );

    if view.is_loading() {
        let _ = writeln!(out, "Generating...");
    }
    if let Some(error) = view.error() {
        let _ = writeln!(out, "{RED}{}{RESET}", error);
    }

    match view.content() {
        Some(content) if !content.is_empty() => {
            let _ = writeln!(out, "{BOLD}Generated {}:{RESET}", form.exam_type);
            match content {
                GeneratedContent::Items(items) if form.exam_type.is_choice() => {
                    render_choices(&mut out, view, items)
                }
                GeneratedContent::Items(items) => render_flashcards(&mut out, items),
                GeneratedContent::Markdown(text) => {
                    let _ = writeln!(out, "{}", text.trim_end());
                }
            }
        }
        _ => {
            let _ = writeln!(out, "{DIM}{}{RESET}", PLACEHOLDER_TEXT);
        }
    }

    out
}

fn render_flashcards(out: &mut String, items: &[Item]) {
    for (i, card) in items.iter().enumerate() {
        let _ = writeln!(out, "{BOLD}Q{}: {}{RESET}", i + 1, card.question);
        let _ = writeln!(out, "A: {}", card.answer);
    }
}

fn render_choices(out: &mut String, view: &ViewModel, items: &[Item]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{BOLD}{}. {}{RESET}", i + 1, item.question);
        match item.options() {
            Some(options) => {
                for (j, opt) in options.iter().enumerate() {
                    let (color, marker) = match view.option_state(i, opt) {
                        OptionState::Neutral => ("", " "),
                        OptionState::Correct => (GREEN, "✓"),
                        OptionState::Incorrect => (RED, "✗"),
                    };
                    let _ = writeln!(out, "  {color}{marker} {}) {}{RESET}", j + 1, opt);
                }
            }
            None => {
                let _ = writeln!(out, "  {DIM}{}{RESET}", NO_OPTIONS_TEXT);
            }
        }
    }
}
