//! Error codes for every assertion error kind.
//!
//! Format: A#### where the first digit indicates where the error arises:
//! - A1xxx: Definition errors (registration time)
//! - A2xxx: Dispatch errors (no match, ambiguity)
//! - A3xxx: Check outcomes (failed assertion, negation that passed)
//! - A9xxx: Internal errors raised by definition bugs

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Definition Errors (A1xxx)
    /// Definition has no parts
    A1001,
    /// Phrase literal is empty
    A1002,
    /// Phrase choice has no members
    A1003,
    /// Phrase begins with the reserved negation marker
    A1004,
    /// Conjunction phrase not followed by a validator
    A1005,
    /// Validator implementation on a definition that takes arguments
    A1006,

    // Dispatch Errors (A2xxx)
    /// No assertion matched the arguments
    A2001,
    /// Two or more assertions matched exactly
    A2002,

    // Check Outcomes (A3xxx)
    /// Assertion failed
    A3001,
    /// Negated assertion passed
    A3002,

    // Internal Errors (A9xxx)
    /// Assertion implementation raised an error
    A9001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::A1001,
        ErrorCode::A1002,
        ErrorCode::A1003,
        ErrorCode::A1004,
        ErrorCode::A1005,
        ErrorCode::A1006,
        ErrorCode::A2001,
        ErrorCode::A2002,
        ErrorCode::A3001,
        ErrorCode::A3002,
        ErrorCode::A9001,
    ];

    /// Get the code as a string (e.g., "A2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::A1001 => "A1001",
            ErrorCode::A1002 => "A1002",
            ErrorCode::A1003 => "A1003",
            ErrorCode::A1004 => "A1004",
            ErrorCode::A1005 => "A1005",
            ErrorCode::A1006 => "A1006",
            ErrorCode::A2001 => "A2001",
            ErrorCode::A2002 => "A2002",
            ErrorCode::A3001 => "A3001",
            ErrorCode::A3002 => "A3002",
            ErrorCode::A9001 => "A9001",
        }
    }

    /// One-line description for `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::A1001 => "assertion definition has no parts",
            ErrorCode::A1002 => "phrase literal is empty",
            ErrorCode::A1003 => "phrase choice has no members",
            ErrorCode::A1004 => "phrase begins with the reserved negation marker",
            ErrorCode::A1005 => "conjunction phrase is not followed by a validator",
            ErrorCode::A1006 => "validator implementation requires a phrase-only definition",
            ErrorCode::A2001 => "no assertion matched the arguments",
            ErrorCode::A2002 => "two or more assertions matched exactly",
            ErrorCode::A3001 => "assertion failed",
            ErrorCode::A3002 => "negated assertion passed",
            ErrorCode::A9001 => "assertion implementation raised an error",
        }
    }

    /// Check if this is a definition error (A1xxx range).
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::A1001
                | ErrorCode::A1002
                | ErrorCode::A1003
                | ErrorCode::A1004
                | ErrorCode::A1005
                | ErrorCode::A1006
        )
    }

    /// Check if this is a dispatch error (A2xxx range).
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, ErrorCode::A2001 | ErrorCode::A2002)
    }

    /// Check if this is a check outcome (A3xxx range).
    pub fn is_check_failure(&self) -> bool {
        matches!(self, ErrorCode::A3001 | ErrorCode::A3002)
    }

    /// Check if this is an internal error (A9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::A9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"A2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
