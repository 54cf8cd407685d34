use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::orchestrator::command::HELP_TEXT;
use crate::orchestrator::{Command, Session};
use crate::render;
use crate::services::build_user_prompt;
use crate::utils::logging::{append_log, init_log_file, log_startup};
use crate::workflow::{Phase, ViewModel};

/// 应用主结构
pub struct App {
    config: Config,
    session: Session,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let client = LlmClient::new(&config);
        let session = Session::new(&config, Arc::new(client));

        Ok(Self { config, session })
    }

    /// 运行终端命令循环，直到 quit 或输入结束
    pub async fn run(&self) -> Result<()> {
        println!("{}\n", HELP_TEXT);
        self.render(&self.session.snapshot())?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut updates = self.session.subscribe();
        let mut last_phase = Phase::Idle;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("读取输入失败")? else {
                        break;
                    };
                    match Command::parse(&line) {
                        Ok(Some(command)) => match self.handle(command) {
                            Ok(true) => {}
                            Ok(false) => break,
                            Err(e) => println!("{}", e),
                        },
                        Ok(None) => {}
                        Err(e) => println!("{}", e),
                    }
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = self.session.snapshot();
                    self.log_outcome(&last_phase, view.phase());
                    last_phase = view.phase().clone();
                    self.render(&view)?;
                }
            }
        }

        info!("👋 会话结束");
        Ok(())
    }

    /// 处理一条命令，返回 `false` 表示退出
    fn handle(&self, command: Command) -> AppResult<bool> {
        match command {
            Command::Subject(subject) => self.session.set_subject(subject),
            Command::FocusArea(focus_area) => self.session.set_focus_area(focus_area),
            Command::ExamType(input) => {
                self.session.set_exam_type(&input)?;
            }
            Command::NumCards(input) => {
                self.session.set_num_cards(&input)?;
            }
            Command::Generate => {
                let prompt = build_user_prompt(self.session.snapshot().form());
                let request_id = self.session.generate();
                self.log_line(&format!("请求 {} 开始: {}", request_id, prompt));
            }
            Command::Select { item, option } => self.session.select_option(item, option)?,
            Command::Show => self
                .render(&self.session.snapshot())
                .map_err(|e| AppError::Other(e.to_string()))?,
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// 输出到终端，并写出 HTML 页面
    fn render(&self, view: &ViewModel) -> Result<()> {
        println!("{}", render::render_view(view));

        let page = render::render_page(view).into_string();
        std::fs::write(&self.config.output_html_file, page)
            .with_context(|| format!("无法写入页面: {}", self.config.output_html_file))?;
        Ok(())
    }

    fn log_outcome(&self, previous: &Phase, current: &Phase) {
        if previous == current {
            return;
        }
        match current {
            Phase::Success(content) => {
                let summary = match content.items() {
                    Some(items) => format!("生成成功: {} 道题目", items.len()),
                    None => "生成成功: markdown 文档".to_string(),
                };
                self.log_line(&summary);
            }
            Phase::Error(message) => self.log_line(&format!("生成失败: {}", message)),
            _ => {}
        }
    }

    fn log_line(&self, line: &str) {
        if let Err(e) = append_log(&self.config.output_log_file, line) {
            warn!("⚠️ 写入会话日志失败: {}", e);
        }
    }
}
