//! 会话 - 编排层
//!
//! ## 职责
//!
//! 1. **状态所有者**：唯一持有 `ViewModel`，所有变化经由 reducer
//! 2. **请求调度**：每次生成都在独立任务中执行，界面保持可响应
//! 3. **请求取代**：新的生成会中止上一个在途任务，只有最新请求的结果会被提交
//! 4. **变更通知**：每次状态变化递增修订号，供界面重新渲染

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clients::CompletionBackend;
use crate::config::Config;
use crate::error::FormError;
use crate::models::{CardCount, ExamType, GeneratedContent, StudyForm};
use crate::workflow::{Action, GenerationFlow, ViewModel};

pub struct Session {
    state: Arc<Mutex<ViewModel>>,
    flow: Arc<GenerationFlow>,
    next_request_id: AtomicU64,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Session {
    pub fn new(config: &Config, backend: Arc<dyn CompletionBackend>) -> Self {
        let num_cards = CardCount::new(config.default_num_cards).unwrap_or_default();
        Self::with_flow(
            GenerationFlow::new(config, backend),
            StudyForm::with_num_cards(num_cards),
        )
    }

    pub fn with_flow(flow: GenerationFlow, form: StudyForm) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(ViewModel::new(form))),
            flow: Arc::new(flow),
            next_request_id: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            revision: Arc::new(revision),
        }
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// 当前状态的快照
    pub fn snapshot(&self) -> ViewModel {
        self.lock_state().clone()
    }

    pub fn dispatch(&self, action: Action) -> bool {
        commit(&self.state, &self.revision, action)
    }

    pub fn set_subject(&self, subject: impl Into<String>) {
        self.dispatch(Action::SetSubject(subject.into()));
    }

    pub fn set_focus_area(&self, focus_area: impl Into<String>) {
        self.dispatch(Action::SetFocusArea(focus_area.into()));
    }

    /// 切换考试类型只影响提示词和渲染分支，不会发起请求
    pub fn set_exam_type(&self, input: &str) -> Result<ExamType, FormError> {
        let exam_type: ExamType = input.parse()?;
        self.dispatch(Action::SetExamType(exam_type));
        Ok(exam_type)
    }

    /// 非法输入被拒绝，表单保留原值
    pub fn set_num_cards(&self, input: &str) -> Result<CardCount, FormError> {
        let num_cards: CardCount = input.parse()?;
        self.dispatch(Action::SetNumCards(num_cards));
        Ok(num_cards)
    }

    /// 选择某道题的某个选项（均从 1 开始编号）
    ///
    /// 仅在选择题视图下有效，问答卡片不显示选项
    pub fn select_option(&self, item_number: usize, option_number: usize) -> Result<(), FormError> {
        let out_of_range = FormError::OptionOutOfRange {
            item: item_number,
            option: option_number,
        };
        let choice = {
            let state = self.lock_state();
            let exam_type = state.form().exam_type;
            if !exam_type.is_choice() {
                return Err(FormError::NotChoiceExam { exam_type });
            }
            item_number
                .checked_sub(1)
                .zip(option_number.checked_sub(1))
                .and_then(|(item, option)| {
                    let options = state.items()?.get(item)?.options()?;
                    options.get(option).cloned().map(|choice| (item, choice))
                })
        };

        let (item, choice) = choice.ok_or(out_of_range)?;
        self.dispatch(Action::SelectOption { item, choice });
        Ok(())
    }

    /// 发起一次生成
    ///
    /// 若已有请求在途，先中止它；返回新请求的编号
    pub fn generate(&self) -> u64 {
        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst) + 1;
        let form = {
            let mut state = self.lock_state();
            state.apply(Action::GenerationStarted { request_id });
            state.form().clone()
        };
        self.revision.send_modify(|rev| *rev += 1);

        let state = Arc::clone(&self.state);
        let flow = Arc::clone(&self.flow);
        let revision = Arc::clone(&self.revision);

        let handle = tokio::spawn(async move {
            let action = match flow.run(&form).await {
                Ok(content) => {
                    log_generated(request_id, &content);
                    Action::GenerationSucceeded {
                        request_id,
                        content,
                    }
                }
                Err(e) => {
                    warn!("[请求 {}] ❌ 生成失败: {}", request_id, e);
                    Action::GenerationFailed {
                        request_id,
                        message: e.user_message(),
                    }
                }
            };

            if !commit(&state, &revision, action) {
                debug!("[请求 {}] 结果已过期，丢弃", request_id);
            }
        });

        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        if let Some(previous) = previous {
            if !previous.is_finished() {
                info!("[请求 {}] 取代上一个在途请求", request_id);
                previous.abort();
            }
        }

        request_id
    }

    /// 等待当前在途的生成结束（包括被取代的情况）
    pub async fn wait_for_completion(&self) {
        loop {
            let handle = self
                .in_flight
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .take();
            match handle {
                Some(handle) => {
                    let _ = handle.await;
                }
                None => break,
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewModel> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = self
            .in_flight
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            handle.abort();
        }
    }
}

fn commit(state: &Mutex<ViewModel>, revision: &watch::Sender<u64>, action: Action) -> bool {
    let applied = state
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .apply(action);
    if applied {
        revision.send_modify(|rev| *rev += 1);
    }
    applied
}

fn log_generated(request_id: u64, content: &GeneratedContent) {
    match content {
        GeneratedContent::Items(items) => {
            info!("[请求 {}] ✓ 生成完成，共 {} 道题目", request_id, items.len())
        }
        GeneratedContent::Markdown(text) => {
            info!("[请求 {}] ✓ 生成完成，markdown {} 字符", request_id, text.chars().count())
        }
    }
}
