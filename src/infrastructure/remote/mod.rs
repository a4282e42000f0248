//! Remote session implementations

mod ftp;

pub use ftp::{FtpConnector, FtpSession};
