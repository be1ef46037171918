//! Test doubles shared by the use case tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ChatSurface, FrameSender, PushError, ViewUpdate};

/// FrameSender that records pushed payloads
pub struct RecordingSender {
    pub connected: bool,
    pub frames: Mutex<Vec<serde_json::Value>>,
}

impl RecordingSender {
    pub fn connected() -> Self {
        Self {
            connected: true,
            frames: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            frames: Mutex::new(Vec::new()),
        }
    }

    pub fn frames(&self) -> Vec<serde_json::Value> {
        self.frames.lock().unwrap().clone()
    }

    pub fn count_typing(&self, is_typing: bool) -> usize {
        self.frames()
            .iter()
            .filter(|f| f["type"] == "TYPING" && f["isTyping"] == is_typing)
            .count()
    }
}

#[async_trait]
impl FrameSender for RecordingSender {
    async fn push(&self, payload: String) -> Result<(), PushError> {
        if !self.connected {
            return Err(PushError::NotConnected);
        }
        let value = serde_json::from_str(&payload).expect("frames are JSON");
        self.frames.lock().unwrap().push(value);
        Ok(())
    }
}

/// ChatSurface that records rendered updates
#[derive(Default)]
pub struct RecordingSurface {
    pub updates: Mutex<Vec<ViewUpdate>>,
}

impl RecordingSurface {
    pub fn updates(&self) -> Vec<ViewUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl ChatSurface for RecordingSurface {
    fn render(&self, update: &ViewUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }
}
