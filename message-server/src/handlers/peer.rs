//! Caller address resolution.
//!
//! The peer address comes from axum's [`ConnectInfo`], which is only present
//! when the server is started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeerAddrError {
    #[error("no peer address available")]
    Missing,

    #[error("client address {0:?} is not host:port")]
    NotHostPort(String),

    #[error("client address host {0:?} is not a valid IP address")]
    InvalidIp(String),
}

/// Transport-level peer address as `host:port`, if the connection exposed one.
#[derive(Debug, Clone, Default)]
pub struct PeerAddr(pub Option<String>);

impl PeerAddr {
    pub fn client_ip(&self) -> Result<IpAddr, PeerAddrError> {
        match &self.0 {
            Some(remote) => client_ip(remote),
            None => Err(PeerAddrError::Missing),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PeerAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PeerAddr(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string()),
        ))
    }
}

/// Split `host:port` and parse the host as an IP literal.
///
/// IPv6 hosts must be bracketed (`[::1]:8080`).
pub fn client_ip(remote: &str) -> Result<IpAddr, PeerAddrError> {
    let not_host_port = || PeerAddrError::NotHostPort(remote.to_owned());

    let (host, port) = remote.rsplit_once(':').ok_or_else(not_host_port)?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_host_port());
    }

    let host = match host.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']').ok_or_else(not_host_port)?,
        None if host.contains(':') => return Err(not_host_port()),
        None => host,
    };

    host.parse::<IpAddr>()
        .map(|ip| ip.to_canonical())
        .map_err(|_| PeerAddrError::InvalidIp(host.to_owned()))
}
