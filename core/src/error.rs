use thiserror::Error;

/// Result type alias for data-access operations
pub type Result<T> = std::result::Result<T, RoommatesError>;

/// Error taxonomy for the Room and Roommate repositories.
///
/// Repositories never catch or retry; every failure surfaces to the
/// immediate caller in one of these categories. An update or delete that
/// matches no row is not an error.
///
/// # Examples
///
/// ```rust
/// use roommates_core::error::RoommatesError;
///
/// let err = RoommatesError::missing_column("MaxOccupancy");
/// assert!(err.is_mapping());
/// assert_eq!(err.exit_code(), 4);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoommatesError {
    /// The database could not be reached or the connection could not be opened
    #[error("Connection error: {0}")]
    Connection(String),

    /// The database rejected or failed to execute a statement
    #[error("Statement error: {0}")]
    Statement(String),

    /// A result row could not be mapped onto a record
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Connection string or other configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A record the caller asked for does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl RoommatesError {
    /// Create a not found error for a room id
    pub fn room_not_found(id: i32) -> Self {
        Self::NotFound(format!("Room with ID {id} not found"))
    }

    /// Create a not found error for a roommate id
    pub fn roommate_not_found(id: i32) -> Self {
        Self::NotFound(format!("Roommate with ID {id} not found"))
    }

    /// Create a mapping error for a column absent from the row
    pub fn missing_column(column: &str) -> Self {
        Self::Mapping(format!("Column '{column}' missing from result row"))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, RoommatesError::Connection(_))
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, RoommatesError::Statement(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, RoommatesError::Mapping(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RoommatesError::NotFound(_))
    }

    /// Process exit code the command-line entry point uses for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RoommatesError::Configuration(_) => 1,
            RoommatesError::Connection(_) => 2,
            RoommatesError::Statement(_) => 3,
            RoommatesError::Mapping(_) => 4,
            RoommatesError::NotFound(_) => 5,
        }
    }
}
