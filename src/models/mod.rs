//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use proxyforge::models::{Port, Proxy, ProxyType, TrojanProxy};
//!
//! let proxy = Proxy::Trojan(TrojanProxy {
//!     name: "example".to_string(),
//!     server: "example.com".to_string(),
//!     port: Port::from(443),
//!     password: "secret".to_string(),
//!     sni: None,
//!     alpn: None,
//!     skip_cert_verify: false,
//!     udp: None,
//!     network: None,
//!     ws_opts: None,
//! });
//! assert_eq!(proxy.proxy_type(), ProxyType::Trojan);
//! ```

mod configs;
mod proxy;

pub use configs::*;
pub use proxy::*;
