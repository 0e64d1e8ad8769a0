use anyhow::Result;
use async_trait::async_trait;

/// A raw inbound chat message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub text: String,
    pub chat_id: String,
}

/// Abstraction over the chat transport delivering signal text. Implementation
/// details (Telegram, stdin, in-memory test feeds) stay behind this trait.
#[async_trait]
pub trait MessageSource: Send {
    /// Receive the next message. An error means the transport is closed.
    async fn next_message(&mut self) -> Result<InboundMessage>;

    /// Send a reply on the channel the messages arrive from.
    async fn reply(&mut self, text: &str) -> Result<()>;
}
