use log::info;

use crate::traits::Notifier;
use crate::types::Placement;

#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub text: String,
    pub duration_secs: f32,
    pub placement: Placement,
}

/// Writes on-screen messages to the log and keeps them for inspection
#[derive(Debug, Default)]
pub struct LogNotifier {
    messages: Vec<PostedMessage>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[PostedMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&PostedMessage> {
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Notifier for LogNotifier {
    fn post_message(&mut self, text: &str, duration_secs: f32, placement: Placement) {
        info!("[screen {placement:?} {duration_secs}s] {}", text.replace('\n', " / "));
        self.messages.push(PostedMessage {
            text: text.to_string(),
            duration_secs,
            placement,
        });
    }
}
