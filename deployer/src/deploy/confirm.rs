//! Operator confirmation strategies

use std::io::{BufRead, IsTerminal};

use dialoguer::Confirm;

use crate::errors::DeployerError;

/// Decides yes/no questions raised during a workflow
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> Result<bool, DeployerError>;
}

/// Always answers yes
#[derive(Debug, Clone, Default)]
pub struct AutoApprove;

impl Confirmation for AutoApprove {
    fn confirm(&self, _prompt: &str) -> Result<bool, DeployerError> {
        Ok(true)
    }
}

/// Always answers no
#[derive(Debug, Clone, Default)]
pub struct AutoReject;

impl Confirmation for AutoReject {
    fn confirm(&self, _prompt: &str) -> Result<bool, DeployerError> {
        Ok(false)
    }
}

/// Asks on the terminal.
///
/// No default answer: only `y` or `n` followed by enter is accepted, any other
/// key is ignored and the question stays open. Without a terminal the answer
/// is read line by line from stdin, so `echo y | lambda-deployer -c` works.
#[derive(Debug, Clone, Default)]
pub struct Interactive;

impl Confirmation for Interactive {
    fn confirm(&self, prompt: &str) -> Result<bool, DeployerError> {
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            let answer = Confirm::new()
                .with_prompt(prompt)
                .wait_for_newline(true)
                .interact()?;
            return Ok(answer);
        }

        println!("{} [y/n]", prompt);
        read_answer(&mut std::io::stdin().lock(), prompt)
    }
}

/// Read lines until one is a yes or a no.
///
/// Reaching the end of input without an answer aborts.
pub fn read_answer<R: BufRead>(reader: &mut R, prompt: &str) -> Result<bool, DeployerError> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(DeployerError::Aborted(format!("no answer to \"{}\"", prompt)));
        }
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}
