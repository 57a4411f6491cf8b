use crate::types::Placement;

/// Fire-and-forget on-screen text messages
pub trait Notifier {
    fn post_message(&mut self, text: &str, duration_secs: f32, placement: Placement);
}
