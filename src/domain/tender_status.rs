use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a tender. `Completed` and `Rejected` are terminal;
/// no transition is defined out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenderStatus {
    Processing,
    PendingReview,
    Completed,
    Rejected,
}

impl TenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenderStatus::Processing => "processing",
            TenderStatus::PendingReview => "pending_review",
            TenderStatus::Completed => "completed",
            TenderStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TenderStatus::Completed | TenderStatus::Rejected)
    }
}

impl FromStr for TenderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(TenderStatus::Processing),
            "pending_review" => Ok(TenderStatus::PendingReview),
            "completed" => Ok(TenderStatus::Completed),
            "rejected" => Ok(TenderStatus::Rejected),
            _ => Err(format!("Invalid tender status: {}", s)),
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
