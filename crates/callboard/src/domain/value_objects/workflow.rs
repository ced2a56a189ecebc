//! Workflow - Purpose category of a call

use serde::{Deserialize, Serialize};

/// Workflow a call is routed through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum Workflow {
    #[default]
    Support,
    Sales,
    Reminder,
}

impl Workflow {
    /// All workflows in the order they are offered for selection
    pub const ALL: [Workflow; 3] = [Workflow::Support, Workflow::Sales, Workflow::Reminder];

    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::Support => "Support",
            Workflow::Sales => "Sales",
            Workflow::Reminder => "Reminder",
        }
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Workflow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "support" => Ok(Workflow::Support),
            "sales" => Ok(Workflow::Sales),
            "reminder" => Ok(Workflow::Reminder),
            _ => Err(format!("Unknown workflow: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_support() {
        assert_eq!(Workflow::default(), Workflow::Support);
    }

    #[test]
    fn test_serializes_capitalized() {
        let json = serde_json::to_string(&Workflow::Reminder).unwrap();
        assert_eq!(json, "\"Reminder\"");

        let parsed: Workflow = serde_json::from_str("\"Sales\"").unwrap();
        assert_eq!(parsed, Workflow::Sales);
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("sales".parse::<Workflow>().unwrap(), Workflow::Sales);
        assert_eq!("REMINDER".parse::<Workflow>().unwrap(), Workflow::Reminder);
        assert!("billing".parse::<Workflow>().is_err());
    }
}
