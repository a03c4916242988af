use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Malformed record in {collection}{}: {reason}", .index.map(|i| format!(" at index {}", i)).unwrap_or_default())]
    MalformedRecord {
        collection: String,
        index: Option<usize>,
        reason: String,
    },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: IdKind, id: i64 },

    #[error("Employee {employee_id} references unknown manager {manager_id}")]
    DanglingManagerReference { employee_id: i64, manager_id: i64 },

    #[error("Cyclic manager chain while resolving employee {employee_id}: {}", format_chain(.chain))]
    CyclicManagerChain { employee_id: i64, chain: Vec<i64> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Which id space a [`ReportError::DuplicateId`] collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Department,
    DepartmentHead,
    Employee,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IdKind::Department => "department",
            IdKind::DepartmentHead => "department head",
            IdKind::Employee => "employee",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

fn format_chain(chain: &[i64]) -> String {
    chain
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ReportError {
    pub fn malformed(collection: &str, index: Option<usize>, reason: impl Into<String>) -> Self {
        ReportError::MalformedRecord {
            collection: collection.to_string(),
            index,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the input document rather than the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ReportError::MalformedRecord { .. }
                | ReportError::DuplicateId { .. }
                | ReportError::DanglingManagerReference { .. }
                | ReportError::CyclicManagerChain { .. }
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReportError::ConfigError { .. } | ReportError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            ReportError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::MalformedRecord { .. } => {
                "Check that the document is a JSON object with 'departments' and 'employees' arrays and that every record has the required fields"
            }
            ReportError::DuplicateId { .. } => {
                "Make department ids, department head ids and employee ids unique"
            }
            ReportError::DanglingManagerReference { .. } => {
                "Add the missing manager to 'employees' or set the manager_id to null"
            }
            ReportError::CyclicManagerChain { .. } => {
                "Break the loop in the manager chain or make one of its members a department head"
            }
            ReportError::IoError(_) => "Check that the input exists and the output directory is writable",
            ReportError::CsvError(_) | ReportError::SerializationError(_) => {
                "Report the problem together with the input document"
            }
            ReportError::ConfigError { .. } | ReportError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        if self.is_data_error() {
            format!("The organisation document could not be processed: {}", self)
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
