//! CLI channel — stdin/stdout REPL driving a booking session.

use std::io::Write;
use std::pin::Pin;

use futures::{Stream, StreamExt, stream};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bridge::PlatformBridge;
use crate::error::Result;
use crate::session::{BookingSession, Reply};

/// Lines typed by the user.
pub type LineStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Reads commands from stdin and draws screens on stdout.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }

    /// Spawn a stdin reader and return its lines as a stream.
    pub fn start(&self) -> LineStream {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|line| (line, rx))
        });

        Box::pin(stream)
    }

    /// Run the session against stdin until `quit` or EOF.
    pub async fn run<B: PlatformBridge>(&self, session: &mut BookingSession<B>) -> Result<()> {
        let lines = self.start();
        let mut out = std::io::stdout();
        drive(session, lines, &mut out).await
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed `lines` to the session and write each reply to `out`.
///
/// Rejected commands are reported and the current screen is redrawn.
pub async fn drive<B, S, W>(session: &mut BookingSession<B>, mut lines: S, out: &mut W) -> Result<()>
where
    B: PlatformBridge,
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    let first = session.start()?;
    respond(out, &first);

    while let Some(line) = lines.next().await {
        let Some(command) = session.parse(&line) else {
            prompt(out);
            continue;
        };
        match session.handle(command) {
            Ok(Reply::Quit) => break,
            Ok(reply) => respond(out, &reply),
            Err(e) => {
                write_line(out, &format!("✗ {e}"));
                if let Ok(view) = session.view() {
                    respond(out, &Reply::View(view));
                }
            }
        }
    }

    tracing::info!(bookings = session.ledger().len(), "Session ended");
    Ok(())
}

fn respond<W: Write>(out: &mut W, reply: &Reply) {
    match reply {
        Reply::View(view) => write_line(out, &view.to_string()),
        Reply::Text(text) => write_line(out, text),
        Reply::Quit => {}
    }
    prompt(out);
}

fn prompt<W: Write>(out: &mut W) {
    if let Err(e) = write!(out, "> ").and_then(|_| out.flush()) {
        tracing::warn!("Failed to write to terminal: {}", e);
    }
}

fn write_line<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "\n{}", text.trim_end()) {
        tracing::warn!("Failed to write to terminal: {}", e);
    }
}
