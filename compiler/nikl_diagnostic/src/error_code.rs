use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where the first digit names the stage:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E6xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Invalid escape sequence
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type name
    E1005,
    /// Invalid assignment target
    E1006,

    // Runtime Errors (E6xxx)
    /// Undefined variable
    E6001,
    /// Variable was deleted
    E6002,
    /// Operator applied to incompatible values
    E6003,
    /// Value is not callable
    E6004,
    /// Wrong number of arguments
    E6005,
    /// Value has no length
    E6006,
    /// Value is not iterable
    E6007,
    /// Index out of bounds
    E6008,
    /// Key not found
    E6009,
    /// Division by zero
    E6010,
    /// Integer overflow
    E6011,
    /// Maximum call depth exceeded
    E6012,
    /// Loop destructuring mismatch
    E6013,
    /// Assignment into a tuple
    E6014,
    /// Value cannot be indexed
    E6015,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
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
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6014 => "E6014",
            ErrorCode::E6015 => "E6015",
        }
    }

    /// Short description of the error family.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "invalid number literal",
            ErrorCode::E0004 => "invalid escape sequence",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "expected type name",
            ErrorCode::E1006 => "invalid assignment target",
            ErrorCode::E6001 => "undefined variable",
            ErrorCode::E6002 => "variable was deleted",
            ErrorCode::E6003 => "operator applied to incompatible values",
            ErrorCode::E6004 => "value is not callable",
            ErrorCode::E6005 => "wrong number of arguments",
            ErrorCode::E6006 => "value has no length",
            ErrorCode::E6007 => "value is not iterable",
            ErrorCode::E6008 => "index out of bounds",
            ErrorCode::E6009 => "key not found",
            ErrorCode::E6010 => "division by zero",
            ErrorCode::E6011 => "integer overflow",
            ErrorCode::E6012 => "maximum call depth exceeded",
            ErrorCode::E6013 => "loop destructuring mismatch",
            ErrorCode::E6014 => "tuples cannot be modified",
            ErrorCode::E6015 => "value cannot be indexed",
        }
    }

    pub fn is_lexer_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_runtime_error(self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ranges() {
        assert!(ErrorCode::E0001.is_lexer_error());
        assert!(ErrorCode::E1003.is_parser_error());
        assert!(ErrorCode::E6012.is_runtime_error());
        assert!(!ErrorCode::E6012.is_parser_error());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ErrorCode::E6004.to_string(), "E6004");
        assert_eq!(ErrorCode::E6004.description(), "value is not callable");
    }
}
