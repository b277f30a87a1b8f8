use thiserror::Error;

/// Errors produced while reading or rewriting a `DXBC` container.
///
/// Every variant carries a human-readable context string describing the
/// offending field and byte range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DxbcError {
    /// The fixed container header is truncated or inconsistent.
    #[error("malformed DXBC header: {context}")]
    MalformedHeader {
        /// Description of the problem.
        context: String,
    },
    /// The chunk offset table is inconsistent.
    #[error("malformed DXBC chunk offsets: {context}")]
    MalformedOffsets {
        /// Description of the problem.
        context: String,
    },
    /// A field points outside the container.
    #[error("DXBC data out of bounds: {context}")]
    OutOfBounds {
        /// Description of the problem.
        context: String,
    },
    /// A chunk payload could not be decoded.
    #[error("invalid DXBC chunk: {context}")]
    InvalidChunk {
        /// Description of the problem.
        context: String,
    },
    /// A chunk required by the operation is absent.
    #[error("missing DXBC chunk: {context}")]
    MissingChunk {
        /// Description of the problem.
        context: String,
    },
}

impl DxbcError {
    pub(crate) fn malformed_header(context: impl Into<String>) -> Self {
        Self::MalformedHeader {
            context: context.into(),
        }
    }

    pub(crate) fn malformed_offsets(context: impl Into<String>) -> Self {
        Self::MalformedOffsets {
            context: context.into(),
        }
    }

    pub(crate) fn out_of_bounds(context: impl Into<String>) -> Self {
        Self::OutOfBounds {
            context: context.into(),
        }
    }

    /// Builds an [`DxbcError::InvalidChunk`] error.
    pub fn invalid_chunk(context: impl Into<String>) -> Self {
        Self::InvalidChunk {
            context: context.into(),
        }
    }

    /// Builds a [`DxbcError::MissingChunk`] error.
    pub fn missing_chunk(context: impl Into<String>) -> Self {
        Self::MissingChunk {
            context: context.into(),
        }
    }

    /// Returns the context string without the variant prefix.
    pub fn context(&self) -> &str {
        match self {
            Self::MalformedHeader { context }
            | Self::MalformedOffsets { context }
            | Self::OutOfBounds { context }
            | Self::InvalidChunk { context }
            | Self::MissingChunk { context } => context,
        }
    }
}
