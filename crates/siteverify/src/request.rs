//! Access to the inbound request being verified.
//!
//! The verifier only needs two things from the host framework: the form
//! field carrying the challenge token and the peer address of the
//! connection. `ClientRequest` is that seam; `FormRequest` is a provided
//! implementation for hosts that already have the form parsed.

use std::collections::HashMap;
use std::net::SocketAddr;

use crate::error::VerifyError;

/// Read access to the parts of an inbound request the verifier needs.
pub trait ClientRequest {
    /// Value of a named form field, if present.
    fn form_value(&self, name: &str) -> Option<&str>;

    /// Peer address of the connection in `host:port` form.
    fn remote_addr(&self) -> &str;
}

/// A minimal [`ClientRequest`] backed by parsed form fields.
#[derive(Debug, Clone, Default)]
pub struct FormRequest {
    fields: HashMap<String, String>,
    remote_addr: String,
}

impl FormRequest {
    /// Create a request with the given peer address (`host:port`).
    pub fn new(remote_addr: impl Into<String>) -> Self {
        Self {
            fields: HashMap::new(),
            remote_addr: remote_addr.into(),
        }
    }

    /// Add a form field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add the challenge token under its conventional field name.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_field(crate::constants::RESPONSE_FIELD, token)
    }
}

impl ClientRequest for FormRequest {
    fn form_value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn remote_addr(&self) -> &str {
        &self.remote_addr
    }
}

/// Split a `host:port` peer address and return the host part.
///
/// Fails when the address carries no port. A port-less address arguably
/// holds a usable IP, but the whole verification fails instead of
/// silently dropping the optional `remoteip` field.
pub(crate) fn client_ip(remote_addr: &str) -> Result<String, VerifyError> {
    // Socket address literals cover the common case, including
    // bracketed IPv6 ("[::1]:8080").
    if let Ok(addr) = remote_addr.parse::<SocketAddr>() {
        return Ok(addr.ip().to_string());
    }

    // Fall back to a plain host:port split for non-literal hosts.
    match remote_addr.rsplit_once(':') {
        Some((host, port))
            if !host.is_empty() && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Ok(host.to_string())
        }
        _ => Err(VerifyError::ClientAddr(remote_addr.to_string())),
    }
}
