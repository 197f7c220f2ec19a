use async_trait::async_trait;
use log::{info, warn};
use std::fmt;

/// Blocking notice shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Submission was blocked because some fields are invalid
    ValidationFailed,
    /// The chosen file is not an image
    NotAnImage,
    /// The last ingredient cannot be removed
    LastIngredient,
    /// The last step cannot be removed
    LastStep,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::ValidationFailed => "Validation error",
            Notice::NotAnImage => "Please choose an image file",
            Notice::LastIngredient | Notice::LastStep => "Cannot delete!",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Notice::ValidationFailed => "Please check the form fields",
            Notice::NotAnImage => "",
            Notice::LastIngredient => "At least one ingredient must remain",
            Notice::LastStep => "At least one step must remain",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text().is_empty() {
            write!(f, "{}", self.title())
        } else {
            write!(f, "{}: {}", self.title(), self.text())
        }
    }
}

/// Question the user must answer before an action proceeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    RemoveStep,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self {
            Prompt::RemoveStep => "Delete step?",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Prompt::RemoveStep => "Are you sure you want to delete this cooking step?",
        }
    }
}

/// Modal dialogs provided by the presentation layer
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Ask the user to confirm; resolves once they answer
    async fn confirm(&self, prompt: Prompt) -> bool;

    /// Show a notice; does not wait for it to be dismissed
    fn notify(&self, notice: Notice);
}

/// Dialogs for headless use: notices go to the log and every prompt is
/// answered with a fixed reply.
#[derive(Debug, Clone, Copy)]
pub struct LogDialogs {
    pub confirm_reply: bool,
}

impl Default for LogDialogs {
    fn default() -> Self {
        Self {
            confirm_reply: true,
        }
    }
}

#[async_trait]
impl Dialogs for LogDialogs {
    async fn confirm(&self, prompt: Prompt) -> bool {
        info!(
            "{} {} -> {}",
            prompt.title(),
            prompt.text(),
            if self.confirm_reply { "yes" } else { "no" }
        );
        self.confirm_reply
    }

    fn notify(&self, notice: Notice) {
        warn!("{}", notice);
    }
}
