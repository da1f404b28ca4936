use crate::error::FlowError;
use dialoguer::{Confirm, Input, Select};
use std::io::IsTerminal;

/// Operator input used by the add-integration flow.
pub trait Prompter: Send + Sync {
    /// Ask for a value that must be provided. Returns the raw input, which
    /// may be empty; the caller decides whether that is fatal.
    fn ask_required(&self, label: &str) -> Result<String, FlowError>;

    /// Ask for a value marked "(Optional)". Blank input comes back as an
    /// empty string so the caller can substitute the field default.
    fn ask_optional(&self, label: &str) -> Result<String, FlowError>;

    /// Yes/no question.
    fn confirm(&self, question: &str) -> Result<bool, FlowError>;

    /// Closed choice; returns the index into `choices`.
    fn choose(&self, prompt: &str, choices: &[String]) -> Result<usize, FlowError>;
}

/// `Prompter` reading from the controlling terminal via dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn ensure_terminal(what: &str) -> Result<(), FlowError> {
        if std::io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(FlowError::Prompt(format!(
                "cannot ask for {what} in non-interactive mode"
            )))
        }
    }

    fn read_line(prompt: String) -> Result<String, FlowError> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn ask_required(&self, label: &str) -> Result<String, FlowError> {
        Self::ensure_terminal(label)?;
        Self::read_line(format!("> Enter {label}"))
    }

    fn ask_optional(&self, label: &str) -> Result<String, FlowError> {
        Self::ensure_terminal(label)?;
        Self::read_line(format!("Enter {label} (Optional)"))
    }

    fn confirm(&self, question: &str) -> Result<bool, FlowError> {
        Self::ensure_terminal("confirmation")?;
        Ok(Confirm::new()
            .with_prompt(format!("> {question}"))
            .default(false)
            .interact()?)
    }

    fn choose(&self, prompt: &str, choices: &[String]) -> Result<usize, FlowError> {
        Self::ensure_terminal("a choice")?;
        Ok(Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(0)
            .interact()?)
    }
}
