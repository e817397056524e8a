use std::collections::BTreeMap;

use log::warn;
use serde_json::{Map, Value};

use crate::models::{Port, Proxy, ProxyType, VmessProxy, WsOpts};
use crate::utils::base64::safe_base64_decode;

/// Parse a VMess link into a Proxy object
///
/// The payload after `vmess://` is a Base64-encoded JSON object in the
/// v2rayN share format (`ps`, `add`, `port`, `id`, `aid`, `scy`, `net`, ...).
pub fn explode_vmess(vmess: &str) -> Option<Proxy> {
    let node = parse_vmess(vmess);
    if node.is_none() {
        warn!("Error parsing VMess link: {}", vmess);
    }
    node.map(Proxy::VMess)
}

fn parse_vmess(vmess: &str) -> Option<VmessProxy> {
    let encoded = vmess.strip_prefix("vmess://")?;
    let decoded = safe_base64_decode(encoded);
    let json: Value = serde_json::from_str(&decoded).ok()?;
    let json = json.as_object()?;

    let name = text(json, "ps")
        .filter(|ps| !ps.is_empty())
        .unwrap_or_else(|| ProxyType::VMess.default_name().to_string());
    let server = text(json, "add")?;
    let uuid = text(json, "id")?;
    let port = Port::parse(&text(json, "port").unwrap_or_default());
    // a missing or non-numeric alterId counts as 0
    let alter_id = match Port::parse(&text(json, "aid").unwrap_or_default()) {
        Port::Number(aid) => aid,
        Port::NaN => 0,
    };
    let cipher = text(json, "scy")
        .filter(|scy| !scy.is_empty())
        .unwrap_or_else(|| "auto".to_string());
    let tls = text(json, "tls").as_deref() == Some("tls");
    let network = text(json, "net");

    let ws_opts = if network.as_deref() == Some("ws") {
        let headers = text(json, "host")
            .map(|host| BTreeMap::from([("Host".to_string(), host)]))
            .unwrap_or_default();
        Some(WsOpts {
            path: text(json, "path"),
            headers: Some(headers),
        })
    } else {
        None
    };

    Some(VmessProxy {
        name,
        server,
        port,
        uuid,
        alter_id,
        cipher,
        tls,
        servername: text(json, "sni"),
        network,
        ws_opts,
        udp: None,
    })
}

/// A scalar field as text. Share links disagree on whether `port` and `aid`
/// are strings or numbers, so both are accepted.
fn text(json: &Map<String, Value>, key: &str) -> Option<String> {
    match json.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
