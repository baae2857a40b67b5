//! Connection parameters: address, timeout, credentials, TLS options.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Parameters for connecting to a gateway.
///
/// # Examples
///
/// ```rust
/// use lattice_link::ConnectParams;
/// use std::time::Duration;
///
/// let params = ConnectParams::new("gate-0.db.svc:15991", Duration::from_secs(30))
///     .with_credentials(lattice_link::Credentials::new("app", "secret"));
/// ```
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// Gateway address, `host:port`.
    pub address: String,

    /// Fixed per-connection timeout, enforced by the transport on
    /// every call and stream pull.
    pub timeout: Duration,

    /// Optional credentials presented during the transport handshake.
    pub credentials: Option<Credentials>,

    /// TLS options for the transport handshake.
    pub tls: TlsOptions,
}

impl ConnectParams {
    /// Parameters with no credentials and TLS disabled.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
            credentials: None,
            tls: TlsOptions::default(),
        }
    }

    /// Set handshake credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set TLS options.
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = tls;
        self
    }
}

/// Username/password pair for the transport handshake.
///
/// The password is excluded from `Debug` output; credentials must
/// never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,

    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Create a credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// TLS settings handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsOptions {
    /// Whether the transport should encrypt the connection.
    pub enabled: bool,

    /// Client private key, for mutual TLS.
    pub keyfile: Option<PathBuf>,

    /// Client certificate, for mutual TLS.
    pub certfile: Option<PathBuf>,
}

impl TlsOptions {
    /// Encrypted connection without client certificates.
    pub fn encrypted() -> Self {
        Self {
            enabled: true,
            keyfile: None,
            certfile: None,
        }
    }

    /// Encrypted connection with a client key/certificate pair.
    pub fn with_client_cert(keyfile: PathBuf, certfile: PathBuf) -> Self {
        Self {
            enabled: true,
            keyfile: Some(keyfile),
            certfile: Some(certfile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builders() {
        let params = ConnectParams::new("localhost:15991", Duration::from_secs(5))
            .with_credentials(Credentials::new("alice", "secret"))
            .with_tls(TlsOptions::encrypted());
        assert_eq!(params.address, "localhost:15991");
        assert!(params.tls.enabled);
        assert_eq!(params.credentials.unwrap().username, "alice");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter2");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_tls_defaults_off() {
        assert!(!TlsOptions::default().enabled);
    }
}
