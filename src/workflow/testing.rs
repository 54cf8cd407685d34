//! 测试用的内存补全后端

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::clients::{ChatRequest, CompletionBackend};
use crate::error::GenerationError;

struct Reply {
    text: Option<String>,
    delay: Duration,
}

/// 按顺序返回预设回复，并记录收到的请求
///
/// 队列只剩最后一条回复时会重复使用它
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    fn new(reply: Reply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([reply])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(Reply {
            text: Some(text.to_string()),
            delay: Duration::ZERO,
        })
    }

    pub fn failing() -> Self {
        Self::new(Reply {
            text: None,
            delay: Duration::ZERO,
        })
    }

    /// 在队列最前面插入一条延迟回复
    pub fn then_slow_first(self, text: &str, delay: Duration) -> Self {
        self.replies.lock().unwrap().push_front(Reply {
            text: Some(text.to_string()),
            delay,
        });
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> (Option<String>, Duration) {
        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            let last = replies.front().unwrap();
            Reply {
                text: last.text.clone(),
                delay: last.delay,
            }
        };
        (reply.text, reply.delay)
    }
}

impl CompletionBackend for ScriptedBackend {
    fn complete<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        self.requests.lock().unwrap().push(request.clone());
        let (text, delay) = self.next_reply();
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            text.ok_or_else(|| GenerationError::transport("scripted://chat", "HTTP 500"))
        }
        .boxed()
    }
}
