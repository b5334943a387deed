//! Operator interaction port used by the restore controller

use crate::error::SnapResult;

use super::controller::RestorePlan;

/// Presents restore details to an operator and asks for confirmation
pub trait Prompt {
    /// Show the live value next to the backup about to replace it
    fn show_comparison(&self, _plan: &RestorePlan) -> SnapResult<()> {
        Ok(())
    }

    /// Ask a yes/no question; `false` cancels the pending mutation
    fn confirm(&self, question: &str) -> SnapResult<bool>;
}

/// Answers yes to everything without showing anything
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> SnapResult<bool> {
        Ok(true)
    }
}
