//! Proxy model definitions
//!
//! Contains the normalized proxy records produced by the link parsers and
//! consumed by the config generator. Field names serialize in the Clash
//! (kebab-case) dialect.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_yaml::Mapping;

/// Represents the type of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    Shadowsocks,
    ShadowsocksR,
    VMess,
    Vless,
    Trojan,
    Hysteria2,
}

impl ProxyType {
    /// The `type` token used in the generated configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "ss",
            ProxyType::ShadowsocksR => "ssr",
            ProxyType::VMess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Hysteria2 => "hysteria2",
        }
    }

    /// Display name used when a link carries no label.
    pub fn default_name(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "Shadowsocks",
            ProxyType::ShadowsocksR => "ShadowsocksR",
            ProxyType::VMess => "Vmess",
            ProxyType::Vless => "Vless",
            ProxyType::Trojan => "Trojan",
            ProxyType::Hysteria2 => "Hysteria2",
        }
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A port as found in a share link.
///
/// Share links are not validated: anything that does not start with an
/// integer is kept as `NaN` and written out as `.nan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    Number(i64),
    NaN,
}

impl Port {
    /// Parses the leading integer of `s`: optional whitespace and sign, then
    /// decimal digits. Trailing garbage is ignored (`"8388/?plugin=x"` is
    /// 8388); no digits at all gives `NaN`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return Port::NaN;
        }

        match digits[..end].parse::<i64>() {
            Ok(n) if negative => Port::Number(-n),
            Ok(n) => Port::Number(n),
            Err(_) => Port::NaN,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Port::NaN)
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Port::Number(port.into())
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{}", n),
            Port::NaN => f.write_str("NaN"),
        }
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Port::Number(n) => serializer.serialize_i64(*n),
            Port::NaN => serializer.serialize_f64(f64::NAN),
        }
    }
}

/// WebSocket transport options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WsOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl WsOpts {
    /// Options with a `Host` header only when `host` is given.
    pub fn new(path: Option<String>, host: Option<String>) -> Self {
        WsOpts {
            path,
            headers: host.map(|host| BTreeMap::from([("Host".to_string(), host)])),
        }
    }
}

/// REALITY handshake options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShadowsocksProxy {
    pub name: String,
    pub server: String,
    pub port: Port,
    pub cipher: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_opts: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShadowsocksRProxy {
    pub name: String,
    pub server: String,
    pub port: Port,
    pub cipher: String,
    pub password: String,
    pub obfs: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfs_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VmessProxy {
    pub name: String,
    pub server: String,
    pub port: Port,
    pub uuid: String,
    #[serde(rename = "alterId")]
    pub alter_id: i64,
    pub cipher: String,
    pub tls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VlessProxy {
    pub name: String,
    pub server: String,
    pub port: Port,
    pub uuid: String,
    pub tls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality_opts: Option<RealityOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrojanProxy {
    pub name: String,
    pub server: String,
    pub port: Port,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    pub skip_cert_verify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Hysteria2Proxy {
    pub name: String,
    pub server: String,
    pub port: Port,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfs_password: Option<String>,
}

/// A normalized proxy record, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Proxy {
    #[serde(rename = "ss")]
    Shadowsocks(ShadowsocksProxy),
    #[serde(rename = "ssr")]
    ShadowsocksR(ShadowsocksRProxy),
    #[serde(rename = "vmess")]
    VMess(VmessProxy),
    #[serde(rename = "vless")]
    Vless(VlessProxy),
    #[serde(rename = "trojan")]
    Trojan(TrojanProxy),
    #[serde(rename = "hysteria2")]
    Hysteria2(Hysteria2Proxy),
}

impl Proxy {
    pub fn proxy_type(&self) -> ProxyType {
        match self {
            Proxy::Shadowsocks(_) => ProxyType::Shadowsocks,
            Proxy::ShadowsocksR(_) => ProxyType::ShadowsocksR,
            Proxy::VMess(_) => ProxyType::VMess,
            Proxy::Vless(_) => ProxyType::Vless,
            Proxy::Trojan(_) => ProxyType::Trojan,
            Proxy::Hysteria2(_) => ProxyType::Hysteria2,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Proxy::Shadowsocks(p) => &p.name,
            Proxy::ShadowsocksR(p) => &p.name,
            Proxy::VMess(p) => &p.name,
            Proxy::Vless(p) => &p.name,
            Proxy::Trojan(p) => &p.name,
            Proxy::Hysteria2(p) => &p.name,
        }
    }

    pub fn server(&self) -> &str {
        match self {
            Proxy::Shadowsocks(p) => &p.server,
            Proxy::ShadowsocksR(p) => &p.server,
            Proxy::VMess(p) => &p.server,
            Proxy::Vless(p) => &p.server,
            Proxy::Trojan(p) => &p.server,
            Proxy::Hysteria2(p) => &p.server,
        }
    }

    pub fn port(&self) -> Port {
        match self {
            Proxy::Shadowsocks(p) => p.port,
            Proxy::ShadowsocksR(p) => p.port,
            Proxy::VMess(p) => p.port,
            Proxy::Vless(p) => p.port,
            Proxy::Trojan(p) => p.port,
            Proxy::Hysteria2(p) => p.port,
        }
    }
}
