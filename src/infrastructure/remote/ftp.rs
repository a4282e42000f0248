//! FTP session over `suppaftp`
//!
//! Plain FTP in passive mode, binary transfers. One control connection per
//! upload run.

use std::io::Cursor;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use suppaftp::types::FileType;
use suppaftp::FtpStream;

use crate::config::RemoteConfig;
use crate::domain::ports::{RemoteConnector, RemoteError, RemoteSession};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Opens FTP sessions
#[derive(Debug, Clone)]
pub struct FtpConnector {
    timeout: Duration,
}

impl Default for FtpConnector {
    fn default() -> Self {
        Self {
            timeout: CONNECT_TIMEOUT,
        }
    }
}

impl FtpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn resolve(remote: &RemoteConfig) -> Result<SocketAddr, RemoteError> {
        remote
            .address()
            .to_socket_addrs()
            .map_err(|e| RemoteError::Connection(e.to_string()))?
            .next()
            .ok_or_else(|| {
                RemoteError::Connection(format!("no address found for {}", remote.host))
            })
    }
}

impl RemoteConnector for FtpConnector {
    type Session = FtpSession;

    fn connect(&self, remote: &RemoteConfig) -> Result<FtpSession, RemoteError> {
        let addr = Self::resolve(remote)?;
        tracing::debug!(%addr, user = %remote.username, "connecting");

        let mut stream = FtpStream::connect_timeout(addr, self.timeout)
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        stream
            .login(&remote.username, &remote.password)
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        stream
            .transfer_type(FileType::Binary)
            .map_err(|e| RemoteError::Connection(e.to_string()))?;

        Ok(FtpSession { stream })
    }
}

/// An authenticated FTP control connection
pub struct FtpSession {
    stream: FtpStream,
}

fn command_error(err: suppaftp::FtpError) -> RemoteError {
    RemoteError::Command(err.to_string().trim().to_string())
}

impl RemoteSession for FtpSession {
    fn change_dir(&mut self, path: &str) -> Result<(), RemoteError> {
        self.stream.cwd(path).map_err(command_error)
    }

    fn make_dir(&mut self, name: &str) -> Result<(), RemoteError> {
        self.stream.mkdir(name).map_err(command_error)
    }

    fn put_file(&mut self, name: &str, content: &[u8]) -> Result<(), RemoteError> {
        let mut reader = Cursor::new(content);
        self.stream
            .put_file(name, &mut reader)
            .map(|_| ())
            .map_err(command_error)
    }

    fn quit(&mut self) -> Result<(), RemoteError> {
        self.stream.quit().map_err(command_error)
    }
}
