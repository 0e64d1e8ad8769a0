use anyhow::{bail, Result};
use async_trait::async_trait;
use fore_core::source::{InboundMessage, MessageSource};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

/// Paragraph-per-message transport over stdin/stdout: a message runs until a
/// blank line, replies go to stdout. Stands in for the real chat feed.
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
    out: Stdout,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            out: tokio::io::stdout(),
        }
    }
}

#[async_trait]
impl MessageSource for StdinSource {
    async fn next_message(&mut self) -> Result<InboundMessage> {
        let mut buf: Vec<String> = Vec::new();
        loop {
            match self.lines.next_line().await? {
                None => {
                    if buf.is_empty() {
                        bail!("stdin closed");
                    }
                    break;
                }
                Some(line) if line.trim().is_empty() => {
                    if !buf.is_empty() {
                        break;
                    }
                }
                Some(line) => buf.push(line),
            }
        }
        Ok(InboundMessage {
            text: buf.join("\n"),
            chat_id: "stdin".to_string(),
        })
    }

    async fn reply(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}
