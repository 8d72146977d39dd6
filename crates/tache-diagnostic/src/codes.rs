//! Error codes for Tache diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Eval errors (E0300 - E0399)
    MissingFilter,
    NotAFilter,
    TooManyArguments,
    FilterFailed,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::MissingFilter,
        ErrorCode::NotAFilter,
        ErrorCode::TooManyArguments,
        ErrorCode::FilterFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingFilter => "E0300",
            ErrorCode::NotAFilter => "E0301",
            ErrorCode::TooManyArguments => "E0302",
            ErrorCode::FilterFailed => "E0303",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MissingFilter => "missing filter",
            ErrorCode::NotAFilter => "value in filter position is not a filter",
            ErrorCode::TooManyArguments => "filter called with too many arguments",
            ErrorCode::FilterFailed => "filter reported an error",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::MissingFilter => {
                Some("check the spelling or make sure the filter is registered in the context")
            }
            ErrorCode::NotAFilter => {
                Some("a value with the same name shadows the filter; rename one of them")
            }
            ErrorCode::TooManyArguments => {
                Some("check the filter's documentation for the expected number of arguments")
            }
            ErrorCode::FilterFailed => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
