//! # Membership Service
//!
//! The core of Synapse: project creation, the join-request lifecycle, and
//! capacity enforcement. This module exclusively owns every transition that
//! touches `projects.current_members`, the membership ledger, or a join
//! request's status — no other component mutates them.

pub mod members;
pub mod projects;
pub mod requests;

use error::{AppError, Result};

/// Decision a project creator takes on a pending join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Accept,
    Reject,
}

impl RequestDecision {
    /// Parse a decision from its route segment.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            _ => {
                Err(AppError::bad_request(
                    "Invalid decision. Must be one of: accept, reject",
                ))
            },
        }
    }
}

impl std::fmt::Display for RequestDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestDecision::Accept => write!(f, "accept"),
            RequestDecision::Reject => write!(f, "reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_parse() {
        assert_eq!(
            RequestDecision::parse("accept").unwrap(),
            RequestDecision::Accept
        );
        assert_eq!(
            RequestDecision::parse("reject").unwrap(),
            RequestDecision::Reject
        );
    }

    #[test]
    fn test_decision_parse_invalid() {
        assert!(RequestDecision::parse("approve").is_err());
        assert!(RequestDecision::parse("").is_err());
        assert!(RequestDecision::parse("Accept").is_err());
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(RequestDecision::Accept.to_string(), "accept");
        assert_eq!(RequestDecision::Reject.to_string(), "reject");
    }
}
