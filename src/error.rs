use std::fmt;

/// The error type for typed access and loading.
///
/// Plain lookups never fail: an unresolved field degrades to its fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulatorError {
    /// Raised when a resolved value can't be converted to the requested type.
    TypeError {
        message: String,
        field: Option<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when backing items can't be decoded from JSON.
    ParseError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl PopulatorError {
    pub(crate) fn type_error(message: impl Into<String>, hint: &str, code: u32) -> Self {
        PopulatorError::TypeError {
            message: message.into(),
            field: None,
            hint: Some(hint.into()),
            code: Some(code),
        }
    }

    /// Attach the field name a conversion failed for.
    pub(crate) fn for_field(self, name: &str) -> Self {
        match self {
            PopulatorError::TypeError { message, hint, code, .. } => PopulatorError::TypeError {
                message,
                field: Some(name.to_string()),
                hint,
                code,
            },
            other => other,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            PopulatorError::TypeError { code, .. }
            | PopulatorError::ParseError { code, .. }
            | PopulatorError::FileError { code, .. } => *code,
        }
    }
}

impl fmt::Display for PopulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulatorError::TypeError { message, field, hint, code } =>
                write!(f, "[populator] Type Error{}: {}{}{}",
                    field.as_ref().map_or(String::new(), |n| format!(" for field '{}'", n)),
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PopulatorError::ParseError { message, line, column, hint, code } =>
                write!(f, "[populator] Parse Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PopulatorError::FileError { message, path, hint, code } =>
                write!(f, "[populator] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for PopulatorError {}

impl From<serde_json::Error> for PopulatorError {
    fn from(e: serde_json::Error) -> Self {
        PopulatorError::ParseError {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
            hint: Some("Backing items must be valid JSON".into()),
            code: Some(201),
        }
    }
}
