//! Crate error types
//!
//! All faults in the coordination layer are handled locally (degrade or
//! drop); nothing here is ever fatal to the host application.

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, LinkError>;

/// Error type for link operations
#[derive(Debug)]
pub enum LinkError {
    /// The broadcast medium could not be opened
    TransportUnavailable(std::io::Error),
    /// The link has already been shut down
    LinkClosed,
    /// I/O error on the broadcast socket
    Io(std::io::Error),
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkError::TransportUnavailable(e) => {
                write!(f, "Broadcast medium unavailable: {}", e)
            }
            LinkError::LinkClosed => write!(f, "Link already shut down"),
            LinkError::Io(e) => write!(f, "Socket error: {}", e),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::TransportUnavailable(e) | LinkError::Io(e) => Some(e),
            LinkError::LinkClosed => None,
        }
    }
}

impl From<std::io::Error> for LinkError {
    fn from(e: std::io::Error) -> Self {
        LinkError::Io(e)
    }
}

/// Error type for wire frame decoding
///
/// Decode failures are never propagated past the event loop; malformed
/// frames are dropped and counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame too short for the declared kind
    UnexpectedEof,
    /// First four bytes did not match the frame magic
    BadMagic,
    /// Unrecognized kind marker (frame from a newer peer; dropped)
    UnknownKind(u8),
    /// Trailing bytes after a complete frame
    TrailingBytes(usize),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnexpectedEof => write!(f, "Frame truncated"),
            DecodeError::BadMagic => write!(f, "Bad frame magic"),
            DecodeError::UnknownKind(k) => write!(f, "Unknown frame kind: 0x{:02X}", k),
            DecodeError::TrailingBytes(n) => write!(f, "{} trailing bytes after frame", n),
        }
    }
}

impl std::error::Error for DecodeError {}
