use core::fmt;

use thiserror::Error;

use lock_core::ParseError;

/**
    Errors raised by the lock authorization pipelines.

    Every variant belongs to one [`ErrorKind`], see [`AuthError::kind`].
*/
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ── External toolkit ─────────────────────────────────────────────
    #[error("failed to launch `{program}`: {reason}")]
    ToolkitUnavailable { program: String, reason: String },
    #[error("`{command}` exited with {status}: {stderr}")]
    ToolkitExit {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("`{0}` did not finish before the deadline")]
    ToolkitTimeout(String),

    // ── Parsing ──────────────────────────────────────────────────────
    #[error(transparent)]
    Name(#[from] ParseError),
    #[error("key dump has no '{0}' label")]
    KeyDumpMissingLabel(String),
    #[error("malformed key dump line {line}: {reason}")]
    KeyDumpMalformed { line: usize, reason: String },
    #[error("key dump produced an empty {0}")]
    KeyDumpEmpty(&'static str),
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },
    #[error("malformed DER signature: {0}")]
    SignatureDer(String),
    #[error("malformed authorization message: {0}")]
    MessageMalformed(String),
    #[error("{path} is not a lock record file: {reason}")]
    RecordFileMalformed { path: String, reason: String },

    // ── Files ────────────────────────────────────────────────────────
    #[error("file operation on {path} failed: {reason}")]
    FileIo { path: String, reason: String },

    // ── Crypto ───────────────────────────────────────────────────────
    #[error("invalid {curve} public key: {reason}")]
    InvalidPublicKey { curve: &'static str, reason: String },
    #[error("invalid {curve} private key: {reason}")]
    InvalidPrivateKey { curve: &'static str, reason: String },
    #[error("signature component {component} is {len} bytes, max 32")]
    SignatureComponentTooLarge { component: char, len: usize },
    #[error("signing failed: {0}")]
    SigningFailed(String),
    #[error("decryption failed: {0}")]
    DecryptFailed(String),
    #[error("signature verification failed")]
    SignatureMismatch,

    // ── Validation ───────────────────────────────────────────────────
    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),
}

/**
    Coarse error taxonomy shared by every pipeline stage.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Subprocess,
    Parse,
    FileIo,
    Crypto,
    Validation,
}

impl AuthError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolkitUnavailable { .. } | Self::ToolkitExit { .. } | Self::ToolkitTimeout(_) => {
                ErrorKind::Subprocess
            }
            Self::Name(_)
            | Self::KeyDumpMissingLabel(_)
            | Self::KeyDumpMalformed { .. }
            | Self::KeyDumpEmpty(_)
            | Self::InvalidHex { .. }
            | Self::SignatureDer(_)
            | Self::MessageMalformed(_)
            | Self::RecordFileMalformed { .. } => ErrorKind::Parse,
            Self::FileIo { .. } => ErrorKind::FileIo,
            Self::InvalidPublicKey { .. }
            | Self::InvalidPrivateKey { .. }
            | Self::SignatureComponentTooLarge { .. }
            | Self::SigningFailed(_)
            | Self::DecryptFailed(_)
            | Self::SignatureMismatch => ErrorKind::Crypto,
            Self::EmptyField(_) => ErrorKind::Validation,
        }
    }

    pub(crate) fn file_io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::FileIo {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn hex(field: &'static str, err: hex::FromHexError) -> Self {
        Self::InvalidHex {
            field,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Subprocess => "subprocess failure",
            Self::Parse => "parse failure",
            Self::FileIo => "file I/O failure",
            Self::Crypto => "crypto failure",
            Self::Validation => "validation failure",
        })
    }
}

/**
    Type alias for results that may return an [`AuthError`].
*/
pub type AuthResult<T> = std::result::Result<T, AuthError>;
