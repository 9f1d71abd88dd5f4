//! Error types for the itinerary engine.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kinds of entity an error can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Trip,
    Step,
    Review,
    Image,
    Activity,
    Accommodation,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Trip => "Trip",
            Entity::Step => "Step",
            Entity::Review => "Review",
            Entity::Image => "Image",
            Entity::Activity => "Activity",
            Entity::Accommodation => "Accommodation",
        };
        f.write_str(name)
    }
}

/// Why a mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// The step still holds a lodging reference.
    AccommodationLinked { sequence_no: u32 },
    /// The step's review still carries images.
    ReviewedWithImages { sequence_no: u32 },
    /// A later step of the trip holds a lodging reference.
    SubsequentAccommodation,
    /// The step already has a review.
    AlreadyReviewed,
    /// The owner already has a trip with this title.
    DuplicateTitle,
    /// A step in the lodging window is already linked to another lodging.
    LodgingOverlap { sequence_no: u32 },
    /// The row changed since the caller read it.
    StaleVersion { expected: u32, actual: u32 },
}

impl ConflictReason {
    /// Short machine-readable code for the reason.
    pub fn code(&self) -> &'static str {
        match self {
            ConflictReason::AccommodationLinked { .. } => "accommodation-linked",
            ConflictReason::ReviewedWithImages { .. } => "reviewed-with-images",
            ConflictReason::SubsequentAccommodation => "subsequent-accommodation",
            ConflictReason::AlreadyReviewed => "already-reviewed",
            ConflictReason::DuplicateTitle => "duplicate-title",
            ConflictReason::LodgingOverlap { .. } => "lodging-overlap",
            ConflictReason::StaleVersion { .. } => "stale-version",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::AccommodationLinked { sequence_no } => write!(
                f,
                "Step {sequence_no} cannot be deleted because it is linked to an accommodation. \
                 Please first edit or delete the accommodation for the step."
            ),
            ConflictReason::ReviewedWithImages { sequence_no } => write!(
                f,
                "Step {sequence_no} cannot be deleted because it is linked to a review with \
                 images. Please first delete the images."
            ),
            ConflictReason::SubsequentAccommodation => f.write_str(
                "One of the following steps has an accommodation which first need to be deleted \
                 or moved to a previous step.",
            ),
            ConflictReason::AlreadyReviewed => f.write_str(
                "This step has already been reviewed, please edit the existing review instead.",
            ),
            ConflictReason::DuplicateTitle => f.write_str(
                "You have already created a trip with that title. Please give this trip a \
                 different title.",
            ),
            ConflictReason::LodgingOverlap { sequence_no } => write!(
                f,
                "Step {sequence_no} is already linked to another accommodation."
            ),
            ConflictReason::StaleVersion { expected, actual } => write!(
                f,
                "The record was changed by someone else (expected version {expected}, found \
                 {actual}). Reload and try again."
            ),
        }
    }
}

/// Coarse classification of failures for callers that only need to branch on
/// the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    ValidationFailed,
    Conflict,
    Unexpected,
}

/// Comprehensive error type for all itinerary operations.
#[derive(Error, Debug)]
pub enum TrekError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Referenced entity does not exist
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: Entity, id: u64 },
    /// Acting user does not own the entity
    #[error("{entity} with ID {id} doesn't seem to be yours, you cannot perform this action")]
    Forbidden { entity: Entity, id: u64 },
    /// No acting user was supplied for an operation that needs one
    #[error("No acting user; sign in before modifying trips")]
    Unauthenticated,
    /// Field-level validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Mutation refused because of dependent state
    #[error("{entity} {id} ({code}): {reason}", code = .reason.code())]
    Conflict {
        entity: Entity,
        id: u64,
        reason: ConflictReason,
    },
    /// The store reported a concurrent writer
    #[error("Unable to save changes ({action}). Try again, and if the problem persists, contact the system administrator.")]
    ConcurrentWrite {
        action: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source. Busy and locked databases are
    /// reported as concurrent writes so the caller can resubmit.
    pub fn with_source(self, source: rusqlite::Error) -> TrekError {
        if is_contention(&source) {
            TrekError::ConcurrentWrite {
                action: self.message,
                source,
            }
        } else {
            TrekError::Database {
                message: self.message,
                source,
            }
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrekError {
        TrekError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrekError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a conflict error for an entity.
    pub fn conflict(entity: Entity, id: u64, reason: ConflictReason) -> Self {
        TrekError::Conflict { entity, id, reason }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrekError::NotFound { .. } => ErrorKind::NotFound,
            TrekError::Forbidden { .. } | TrekError::Unauthenticated => ErrorKind::Forbidden,
            TrekError::InvalidInput { .. } => ErrorKind::ValidationFailed,
            TrekError::Conflict { .. } | TrekError::ConcurrentWrite { .. } => ErrorKind::Conflict,
            TrekError::Database { .. }
            | TrekError::FileSystem { .. }
            | TrekError::XdgDirectory(_)
            | TrekError::Serialization { .. }
            | TrekError::Configuration { .. } => ErrorKind::Unexpected,
        }
    }

    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrekError::ConcurrentWrite { .. }
                | TrekError::Conflict {
                    reason: ConflictReason::StaleVersion { .. },
                    ..
                }
        )
    }
}

fn is_contention(error: &rusqlite::Error) -> bool {
    matches!(
        error.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked)
    )
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrekError::database(message).with_source(e))
    }
}

/// Result type alias for itinerary operations
pub type Result<T> = std::result::Result<T, TrekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            TrekError::NotFound {
                entity: Entity::Step,
                id: 1
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(TrekError::Unauthenticated.kind(), ErrorKind::Forbidden);
        assert_eq!(
            TrekError::invalid_input("title").with_reason("empty").kind(),
            ErrorKind::ValidationFailed
        );
        assert_eq!(
            TrekError::conflict(Entity::Step, 4, ConflictReason::SubsequentAccommodation).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_conflict_message_names_code_and_step() {
        let error = TrekError::conflict(
            Entity::Step,
            9,
            ConflictReason::AccommodationLinked { sequence_no: 2 },
        );
        let message = error.to_string();
        assert!(message.contains("accommodation-linked"));
        assert!(message.contains("Step 2 cannot be deleted"));
    }

    #[test]
    fn test_busy_database_is_concurrent_write() {
        let source = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        let error = TrekError::database("Failed to commit transaction").with_source(source);
        assert!(matches!(error, TrekError::ConcurrentWrite { .. }));
        assert!(error.is_retryable());
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_stale_version_is_retryable() {
        let error = TrekError::conflict(
            Entity::Step,
            1,
            ConflictReason::StaleVersion {
                expected: 1,
                actual: 2,
            },
        );
        assert!(error.is_retryable());
        assert!(!TrekError::Unauthenticated.is_retryable());
    }
}
