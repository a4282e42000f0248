//! Remote Session Port
//!
//! Abstracts a stateful file-transfer session (FTP today) with a current
//! working directory. The deployer only needs five primitives; everything
//! else (idempotent directory creation, returning to the upload root) is
//! built on top of them in `application::upload`.

use std::fmt;

use crate::config::RemoteConfig;

/// Error reported by a remote session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Network setup or authentication failed
    Connection(String),
    /// The server rejected a command
    Command(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "connection error: {}", msg),
            Self::Command(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// An open session on the remote server
pub trait RemoteSession {
    /// Change the working directory (absolute or relative to the current one)
    fn change_dir(&mut self, path: &str) -> Result<(), RemoteError>;

    /// Create a single directory relative to the working directory
    fn make_dir(&mut self, name: &str) -> Result<(), RemoteError>;

    /// Store `content` as `name` in the working directory, replacing any existing file
    fn put_file(&mut self, name: &str, content: &[u8]) -> Result<(), RemoteError>;

    /// Close the session
    fn quit(&mut self) -> Result<(), RemoteError>;
}

/// Opens sessions to the configured remote
pub trait RemoteConnector {
    type Session: RemoteSession;

    /// Connect and authenticate
    fn connect(&self, remote: &RemoteConfig) -> Result<Self::Session, RemoteError>;
}

impl<T: RemoteConnector + ?Sized> RemoteConnector for &T {
    type Session = T::Session;

    fn connect(&self, remote: &RemoteConfig) -> Result<Self::Session, RemoteError> {
        (**self).connect(remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display() {
        let err = RemoteError::Connection("530 Login incorrect".to_string());
        assert_eq!(err.to_string(), "connection error: 530 Login incorrect");

        let err = RemoteError::Command("550 Permission denied".to_string());
        assert_eq!(err.to_string(), "550 Permission denied");
    }
}
