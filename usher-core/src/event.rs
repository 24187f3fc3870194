//! Inbound event metadata.

/// The immutable metadata of one inbound chat event.
///
/// The upstream transport is an external collaborator; this type is the only
/// shape the engine knows about it. Events are wrapped into a
/// [`Context`](crate::Context) before dispatch.
#[derive(Debug, Clone)]
pub struct Event {
    sender: i64,
    scope: i64,
    text: String,
    reply_to: Option<i64>,
}

impl Event {
    /// Create an event from its upstream fields.
    pub fn new(sender: i64, scope: i64, text: impl Into<String>) -> Self {
        Self {
            sender,
            scope,
            text: text.into(),
            reply_to: None,
        }
    }

    /// Attach the id of the message this event replies to.
    pub fn with_reply_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    /// The caller id of the sender.
    pub fn sender(&self) -> i64 {
        self.sender
    }

    /// The scope (chat/group) id the event belongs to.
    pub fn scope(&self) -> i64 {
        self.scope
    }

    /// The raw message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The replied-to message id, if this event is a reply.
    pub fn reply_to(&self) -> Option<i64> {
        self.reply_to
    }
}
