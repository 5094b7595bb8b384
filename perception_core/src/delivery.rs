//! Handing phrased perceptions to the characters who perceive them.

use tracing::trace;
use world_graph::{Character, EntityId};

/// Where phrased text goes. Implemented by the embedding server.
pub trait PerceptionSink {
    /// Direct text to a connected player.
    fn send(&mut self, recipient: &Character, text: &str);

    /// Run the named hook on a scripted character. Returns whether a hook
    /// handled it.
    fn invoke_hook(&mut self, recipient: &Character, hook: &str, text: &str) -> bool;
}

/// One recorded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: EntityId,
    pub text: String,
    /// `None` for direct player text, otherwise the hook name.
    pub hook: Option<String>,
}

/// A sink that keeps every delivery in order. Handy for logging and tests.
#[derive(Debug, Clone)]
pub struct MessageLog {
    pub deliveries: Vec<Delivery>,
    /// What `invoke_hook` reports back.
    pub hooks_handled: bool,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            deliveries: Vec::new(),
            hooks_handled: true,
        }
    }

    /// Everything delivered to `recipient`, in order.
    pub fn messages_for(&self, recipient: EntityId) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter(|d| d.recipient == recipient)
            .map(|d| d.text.as_str())
            .collect()
    }

    pub fn received(&self, recipient: EntityId) -> bool {
        self.deliveries.iter().any(|d| d.recipient == recipient)
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl PerceptionSink for MessageLog {
    fn send(&mut self, recipient: &Character, text: &str) {
        self.deliveries.push(Delivery {
            recipient: recipient.id,
            text: text.to_string(),
            hook: None,
        });
    }

    fn invoke_hook(&mut self, recipient: &Character, hook: &str, text: &str) -> bool {
        self.deliveries.push(Delivery {
            recipient: recipient.id,
            text: text.to_string(),
            hook: Some(hook.to_string()),
        });
        self.hooks_handled
    }
}

/// Deliver `text` to one character: players get it directly, everyone else
/// through `hook`.
pub(crate) fn deliver_to<S: PerceptionSink + ?Sized>(
    sink: &mut S,
    recipient: &Character,
    hook: &str,
    text: &str,
) {
    if recipient.is_player() {
        sink.send(recipient, text);
    } else {
        let handled = sink.invoke_hook(recipient, hook, text);
        trace!(recipient = %recipient.id, hook, handled, "perception hook invoked");
    }
}
