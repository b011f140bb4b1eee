//! Line input for the terminal client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Redisplay the prompt after printing asynchronous output
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Read lines on a dedicated thread (rustyline is synchronous) and forward
/// them until the receiver is dropped, Ctrl+C or Ctrl+D.
pub fn spawn_readline(
    prompt: String,
    input_tx: mpsc::UnboundedSender<String>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    })
}

/// Ask for a single value (e.g. a password that was not passed on the command line).
pub async fn ask(prompt: &str) -> Result<String, ClientError> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || {
        let mut rl = DefaultEditor::new().map_err(|e| ClientError::Config(e.to_string()))?;
        rl.readline(&prompt)
            .map(|line| line.trim_end_matches(['\r', '\n']).to_string())
            .map_err(|e| ClientError::InvalidInput(format!("no input: {}", e)))
    })
    .await
    .map_err(|e| ClientError::InvalidInput(e.to_string()))?
}
