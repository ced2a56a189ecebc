//! CallStatus - Lifecycle state reported by the backend
//!
//! The backend owns the status vocabulary. Only the four values below are
//! recognized; anything else is carried through as its raw text.

/// Recognized call status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStatus {
    Pending,
    Initiated,
    Completed,
    Failed,
}

impl CallStatus {
    /// Classify a raw status string, ignoring letter case.
    ///
    /// Returns `None` for statuses outside the known set.
    pub fn classify(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "pending" => Some(CallStatus::Pending),
            "initiated" => Some(CallStatus::Initiated),
            "completed" => Some(CallStatus::Completed),
            "failed" => Some(CallStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Pending => write!(f, "pending"),
            CallStatus::Initiated => write!(f, "initiated"),
            CallStatus::Completed => write!(f, "completed"),
            CallStatus::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ignores_case() {
        assert_eq!(CallStatus::classify("Pending"), Some(CallStatus::Pending));
        assert_eq!(CallStatus::classify("INITIATED"), Some(CallStatus::Initiated));
        assert_eq!(CallStatus::classify("completed"), Some(CallStatus::Completed));
        assert_eq!(CallStatus::classify("failed"), Some(CallStatus::Failed));
    }

    #[test]
    fn test_unknown_status() {
        assert_eq!(CallStatus::classify("cancelled"), None);
        assert_eq!(CallStatus::classify(""), None);
    }
}
