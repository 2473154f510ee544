use thiserror::Error;

/// Result type alias using TangoError
pub type Result<T> = std::result::Result<T, TangoError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Archive layer
    NotFound,
    NotAZip,
    CorruptArchive,

    // Decode layer
    InvalidMetadata,
    InvalidTermRow,

    // Import guard
    DuplicateDictionary,

    // Lookup
    CorruptGlossary,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotAZip => "ERR_NOT_A_ZIP",
            ExErrorKind::CorruptArchive => "ERR_CORRUPT_ARCHIVE",
            ExErrorKind::InvalidMetadata => "ERR_INVALID_METADATA",
            ExErrorKind::InvalidTermRow => "ERR_INVALID_TERM_ROW",
            ExErrorKind::DuplicateDictionary => "ERR_DUPLICATE_DICTIONARY",
            ExErrorKind::CorruptGlossary => "ERR_CORRUPT_GLOSSARY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity, row position) for the human-readable message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    row: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            row: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (dictionary title, archive entry name, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add the zero-based row position the error refers to
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the row position, if any
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(row) = self.row {
            write!(f, " (row: {})", row)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for dictionary import and lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TangoError {
    // ===== Archive Errors =====
    /// The archive path does not exist
    #[error("Dictionary archive not found: {path}")]
    NotFound { path: String },

    /// The file exists but is not a zip container
    #[error("Not a zip archive: {path}: {reason}")]
    NotAZip { path: String, reason: String },

    /// An entry inside the container could not be read or decompressed
    #[error("Corrupt archive entry {entry}: {reason}")]
    CorruptArchive { entry: String, reason: String },

    // ===== Decode Errors =====
    /// index.json is missing, not an object, or lacks a title
    #[error("Invalid dictionary metadata: {reason}")]
    InvalidMetadata { reason: String },

    /// A term-bank entry is not valid JSON or not an array of rows
    #[error("Invalid term bank {entry}: {reason}")]
    InvalidTermBank { entry: String, reason: String },

    /// A term-bank row does not have the expected positional shape
    #[error("Invalid term row {row} in {entry}: {reason}")]
    InvalidTermRow {
        entry: String,
        row: usize,
        reason: String,
    },

    // ===== Import Errors =====
    /// A dictionary with the same title was already imported
    #[error("Dictionary already exists: {title}")]
    DuplicateDictionary { title: String },

    // ===== Lookup Errors =====
    /// A stored glossary blob is not a valid JSON string array
    #[error("Corrupt glossary for term {expression}: {reason}")]
    CorruptGlossary { expression: String, reason: String },

    // ===== Serialization =====
    /// A value could not be encoded for storage
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<TangoError> for ExError {
    fn from(err: TangoError) -> Self {
        let message = err.to_string();
        match err {
            TangoError::NotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("open_archive")
                .with_entity_id(path)
                .with_message(message),

            TangoError::NotAZip { path, .. } => ExError::new(ExErrorKind::NotAZip)
                .with_op("open_archive")
                .with_entity_id(path)
                .with_message(message),

            TangoError::CorruptArchive { entry, .. } => ExError::new(ExErrorKind::CorruptArchive)
                .with_op("read_archive_entry")
                .with_entity_id(entry)
                .with_message(message),

            TangoError::InvalidMetadata { .. } => ExError::new(ExErrorKind::InvalidMetadata)
                .with_op("decode_index")
                .with_message(message),

            TangoError::InvalidTermBank { entry, .. } => ExError::new(ExErrorKind::InvalidTermRow)
                .with_op("decode_term_bank")
                .with_entity_id(entry)
                .with_message(message),

            TangoError::InvalidTermRow { entry, row, .. } => {
                ExError::new(ExErrorKind::InvalidTermRow)
                    .with_op("decode_term_bank")
                    .with_entity_id(entry)
                    .with_row(row)
                    .with_message(message)
            }

            TangoError::DuplicateDictionary { title } => {
                ExError::new(ExErrorKind::DuplicateDictionary)
                    .with_op("begin_import")
                    .with_entity_id(title)
                    .with_message(message)
            }

            TangoError::CorruptGlossary { expression, .. } => {
                ExError::new(ExErrorKind::CorruptGlossary)
                    .with_op("find_terms")
                    .with_entity_id(expression)
                    .with_message(message)
            }

            TangoError::Serialization { .. } => ExError::new(ExErrorKind::Serialization)
                .with_op("encode_glossary")
                .with_message(message),
        }
    }
}

impl From<serde_json::Error> for TangoError {
    fn from(err: serde_json::Error) -> Self {
        TangoError::Serialization {
            message: err.to_string(),
        }
    }
}
