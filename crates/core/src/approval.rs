//! Approval action kinds and the reviewer-comment rule.
//!
//! The service exposes one endpoint per decision on a pending step
//! execution. Reject and request-changes decisions must carry a
//! reviewer comment; a plain approval may omit it.

/// Decision a reviewer can record on a pending step execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Approve the step.
    Approve,
    /// Reject the step, ending the workflow execution.
    Reject,
    /// Send the request back to its submitter for changes.
    RequestChanges,
}

impl ApprovalAction {
    /// Endpoint path segment for this action.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApprovalAction::Approve => "approve",
            ApprovalAction::Reject => "reject",
            ApprovalAction::RequestChanges => "request-changes",
        }
    }

    /// Whether the service requires a comment for this action.
    pub fn requires_comment(&self) -> bool {
        matches!(self, ApprovalAction::Reject | ApprovalAction::RequestChanges)
    }
}
