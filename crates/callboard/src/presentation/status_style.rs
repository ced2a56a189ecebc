//! Status badge styling

use crate::domain::CallStatus;

/// Visual treatment for a recognized status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusStyle {
    Pending,
    Initiated,
    Completed,
    Failed,
}

impl StatusStyle {
    /// Look up the style for a raw status, ignoring case.
    ///
    /// Unrecognized statuses get no special style.
    pub fn for_status(raw: &str) -> Option<Self> {
        CallStatus::classify(raw).map(Self::from)
    }
}

impl From<CallStatus> for StatusStyle {
    fn from(status: CallStatus) -> Self {
        match status {
            CallStatus::Pending => StatusStyle::Pending,
            CallStatus::Initiated => StatusStyle::Initiated,
            CallStatus::Completed => StatusStyle::Completed,
            CallStatus::Failed => StatusStyle::Failed,
        }
    }
}
