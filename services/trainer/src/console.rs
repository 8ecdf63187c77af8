//! Console interaction seam.
//!
//! Every suspension point in the trainer is a blocking wait for a line of
//! terminal input. Runners talk to the terminal only through `Interaction`,
//! so tests can drive whole sessions with scripted answers.

use anyhow::{Result, bail};
use std::io::{BufRead, Write};

/// The trainer's view of the terminal.
pub trait Interaction {
    /// Prints one line of output.
    fn say(&mut self, line: &str);

    /// Prints `prompt` without a newline and blocks for one line of input,
    /// returned without its trailing newline.
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// `Interaction` over the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct Stdio;

impl Interaction for Stdio {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            bail!("input stream closed");
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Scripted stand-in for tests: pops pre-baked answers and records the
/// whole transcript.
#[cfg(test)]
pub(crate) struct ScriptedIo {
    answers: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedIo {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedIo {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl Interaction for ScriptedIo {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("scripted input exhausted"),
        }
    }
}
