//! Scripted stand-in for the chat-completion port used by unit tests.

use crate::ports::{ChatCompletionService, PortError, PortResult, PromptMessage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct ScriptedChatService {
    credential: bool,
    replies: Mutex<VecDeque<PortResult<String>>>,
    calls: Mutex<Vec<Vec<PromptMessage>>>,
}

impl ScriptedChatService {
    pub fn new(replies: Vec<PortResult<String>>) -> Self {
        Self {
            credential: true,
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn without_credential() -> Self {
        Self {
            credential: false,
            ..Self::new(vec![])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call(&self, index: usize) -> Vec<PromptMessage> {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ChatCompletionService for ScriptedChatService {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn complete(&self, messages: Vec<PromptMessage>) -> PortResult<String> {
        self.calls.lock().unwrap().push(messages);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Unexpected("no scripted reply left".into())))
    }
}
