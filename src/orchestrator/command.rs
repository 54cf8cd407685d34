//! 终端命令解析
//!
//! 每行一条命令，对应原页面上的一个表单控件或一次点击

use anyhow::{bail, Result};
use regex::Regex;

pub const HELP_TEXT: &str = "\
命令:
  subject <text>          设置科目
  type <exam-type>        flashcards | multiple-choice | true-false
  focus <text>            设置重点范围
  count <n>               题目数量（正整数）
  generate                生成题目
  select <item> <option>  选择第 item 题的第 option 个选项（从 1 开始）
  show                    重新显示当前结果
  help                    显示帮助
  quit                    退出";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Subject(String),
    ExamType(String),
    FocusArea(String),
    NumCards(String),
    Generate,
    Select { item: usize, option: usize },
    Show,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入，空行返回 `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let re = Regex::new(r"^(\S+)(?:\s+(.*))?$")?;
        let Some(caps) = re.captures(line) else {
            bail!("无法识别的命令: {}", line);
        };
        let name = caps[1].to_ascii_lowercase();
        let arg = caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();

        let command = match name.as_str() {
            "subject" => Command::Subject(arg),
            "type" => Command::ExamType(arg),
            "focus" => Command::FocusArea(arg),
            "count" => Command::NumCards(arg),
            "generate" | "g" => Command::Generate,
            "select" | "s" => parse_select(&arg)?,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("未知命令: {}（输入 help 查看帮助）", other),
        };

        Ok(Some(command))
    }
}

fn parse_select(arg: &str) -> Result<Command> {
    let re = Regex::new(r"^(\d+)\s+(\d+)$")?;
    let Some(caps) = re.captures(arg) else {
        bail!("用法: select <item> <option>");
    };
    Ok(Command::Select {
        item: caps[1].parse()?,
        option: caps[2].parse()?,
    })
}
