use log::warn;
use serde_yaml::{Mapping, Value};

use super::common::{remark_or_default, split_host_port, split_query, split_remark};
use crate::models::{Proxy, ProxyType, ShadowsocksProxy};
use crate::utils::base64::safe_base64_decode;

/// Parse a Shadowsocks link into a Proxy object
///
/// Supports both the SIP002 form `ss://base64(method:password)@server:port`
/// (optionally followed by `/?plugin=...`) and the legacy form
/// `ss://base64(method:password@server:port)`.
pub fn explode_ss(ss: &str) -> Option<Proxy> {
    let node = parse_ss(ss);
    if node.is_none() {
        warn!("Error parsing SS link: {}", ss);
    }
    node.map(Proxy::Shadowsocks)
}

fn parse_ss(ss: &str) -> Option<ShadowsocksProxy> {
    let content = ss.strip_prefix("ss://")?;
    let (content, remark) = split_remark(content)?;
    let name = remark_or_default(remark, ProxyType::Shadowsocks);

    let (method, password, server_info) = match content.split_once('@') {
        Some((secret, server_info)) => {
            // SIP002 format
            let secret = safe_base64_decode(secret);
            let (method, password) = secret.split_once(':')?;
            (method.to_string(), password.to_string(), server_info.to_string())
        }
        None => {
            // Legacy format
            let decoded = safe_base64_decode(content);
            let (secret, server_info) = decoded.rsplit_once('@')?;
            let (method, password) = secret.split_once(':')?;
            (method.to_string(), password.to_string(), server_info.to_string())
        }
    };

    let (address, params) = split_query(&server_info)?;
    let (server, port) = split_host_port(address)?;
    let (plugin, plugin_opts) = match params.get("plugin") {
        Some(plugin) => {
            let (plugin, opts) = parse_plugin(plugin);
            (Some(plugin), opts)
        }
        None => (None, None),
    };

    Some(ShadowsocksProxy {
        name,
        server,
        port,
        cipher: method,
        password,
        plugin,
        plugin_opts,
        udp: None,
    })
}

/// Converts a SIP003 plugin string (`name;key=value;flag`) into the Clash
/// plugin name and `plugin-opts` mapping.
fn parse_plugin(plugin: &str) -> (String, Option<Mapping>) {
    let mut parts = plugin.split(';');
    let name = parts.next().unwrap_or_default();
    let (name, is_obfs) = match name {
        "obfs-local" | "simple-obfs" => ("obfs", true),
        other => (other, false),
    };

    let mut opts = Mapping::new();
    for part in parts.filter(|p| !p.is_empty()) {
        let (key, value) = match part.split_once('=') {
            Some((key, value)) => (key, Value::from(value)),
            // bare flags such as `tls`
            None => (part, Value::Bool(true)),
        };
        let key = match key {
            "obfs" if is_obfs => "mode",
            "obfs-host" if is_obfs => "host",
            key => key,
        };
        opts.insert(Value::from(key), value);
    }

    let opts = if opts.is_empty() { None } else { Some(opts) };
    (name.to_string(), opts)
}
