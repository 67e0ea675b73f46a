//! Error codes for all diagnostics.
//!
//! The first digit names the phase the condition belongs to, so hosts can
//! group or filter without matching on messages.

use std::fmt;

/// Error codes.
///
/// Format: E#### / W#### where the first digit indicates the category:
/// - E0xxx: lexical errors
/// - E1xxx: syntax errors
/// - E2xxx: type errors (argument checks)
/// - E3xxx: operation errors
/// - E4xxx: resolution errors
/// - E9xxx: limits and internal errors
/// - W1xxx: warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical errors (E0xxx)
    /// Unterminated quoted string
    E0001,
    /// Unterminated comment
    E0002,
    /// Unterminated interpolation
    E0003,
    /// Invalid hex colour
    E0004,

    // Syntax errors (E1xxx)
    /// Invalid CSS: expected something else
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Invalid selector
    E1004,
    /// Parent selector not allowed here
    E1005,
    /// Directive not allowed in this context
    E1006,
    /// Invalid declaration or property
    E1007,

    // Type errors (E2xxx)
    /// Argument has the wrong type
    E2001,
    /// Argument out of range
    E2002,
    /// Argument must be unitless
    E2003,
    /// Incompatible units
    E2004,
    /// Wrong number of arguments or unknown keyword argument
    E2005,

    // Operation errors (E3xxx)
    /// Undefined operation
    E3001,
    /// Division by zero
    E3002,
    /// `@error` raised by the stylesheet
    E3003,
    /// Value cannot be emitted as CSS
    E3004,
    /// `@extend` target not found
    E3005,
    /// Other evaluation error
    E3006,

    // Resolution errors (E4xxx)
    /// Undefined variable
    E4001,
    /// Undefined mixin
    E4002,
    /// Undefined function
    E4003,

    // Limits (E9xxx)
    /// Nesting limit exceeded
    E9001,
    /// Internal error
    E9002,

    // Warnings (W1xxx)
    /// Deprecated behaviour
    W1001,
    /// `@warn`
    W1002,
    /// `@debug`
    W1003,
}

impl ErrorCode {
    /// The code as text (e.g. `"E1001"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::W1003 => "W1003",
        }
    }

    /// One-line description for `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string",
            ErrorCode::E0002 => "unterminated comment",
            ErrorCode::E0003 => "unterminated interpolation",
            ErrorCode::E0004 => "invalid hex colour",
            ErrorCode::E1001 => "invalid CSS",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "invalid selector",
            ErrorCode::E1005 => "parent selector not allowed here",
            ErrorCode::E1006 => "directive not allowed here",
            ErrorCode::E1007 => "invalid declaration",
            ErrorCode::E2001 => "argument has the wrong type",
            ErrorCode::E2002 => "argument out of range",
            ErrorCode::E2003 => "argument must be unitless",
            ErrorCode::E2004 => "incompatible units",
            ErrorCode::E2005 => "wrong arguments",
            ErrorCode::E3001 => "undefined operation",
            ErrorCode::E3002 => "division by zero",
            ErrorCode::E3003 => "error raised by @error",
            ErrorCode::E3004 => "value is not valid CSS",
            ErrorCode::E3005 => "extend target not found",
            ErrorCode::E3006 => "evaluation error",
            ErrorCode::E4001 => "undefined variable",
            ErrorCode::E4002 => "undefined mixin",
            ErrorCode::E4003 => "undefined function",
            ErrorCode::E9001 => "nesting limit exceeded",
            ErrorCode::E9002 => "internal error",
            ErrorCode::W1001 => "deprecated behaviour",
            ErrorCode::W1002 => "warning from @warn",
            ErrorCode::W1003 => "message from @debug",
        }
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E0") || self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
