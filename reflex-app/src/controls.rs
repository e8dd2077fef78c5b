//! Keyboard commands, read line by line from stdin.

use std::io::BufRead;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Escape: pause, or resume when already paused.
    TogglePause,
    Quit,
    Restart,
    ToggleDelayCountdown,
    ToggleDurationCountdown,
    ToggleRoundsLeft,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "esc" => Ok(Self::TogglePause),
            "q" | "quit" => Ok(Self::Quit),
            "r" | "restart" => Ok(Self::Restart),
            "d" | "delay" => Ok(Self::ToggleDelayCountdown),
            "s" | "duration" => Ok(Self::ToggleDurationCountdown),
            "n" | "rounds" => Ok(Self::ToggleRoundsLeft),
            other => Err(format!("unknown command `{other}` (p, q, r, d, s, n)")),
        }
    }
}

/// Spawns a reader thread that forwards parsed commands. The channel closes
/// when stdin does.
pub fn spawn_reader() -> Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => log::warn!("{e}"),
            }
        }
    });
    rx
}
