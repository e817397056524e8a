use log::warn;

use super::common::{remark_or_default, split_host_port, split_query, split_remark};
use crate::models::{Proxy, ProxyType, RealityOpts, VlessProxy, WsOpts};

/// Parse a VLESS link into a Proxy object
///
/// Format: `vless://uuid@server:port?security=reality&pbk=...&type=ws#remark`
pub fn explode_vless(vless: &str) -> Option<Proxy> {
    let node = parse_vless(vless);
    if node.is_none() {
        warn!("Error parsing VLESS link: {}", vless);
    }
    node.map(Proxy::Vless)
}

fn parse_vless(vless: &str) -> Option<VlessProxy> {
    let content = vless.strip_prefix("vless://")?;
    let (content, remark) = split_remark(content)?;
    let name = remark_or_default(remark, ProxyType::Vless);

    let (uuid, server_info) = content.split_once('@')?;
    let (address, params) = split_query(server_info)?;
    let (server, port) = split_host_port(address)?;

    let security = params.get("security").map(String::as_str);
    let network = params.get("type").cloned();

    let reality_opts = if security == Some("reality") {
        Some(RealityOpts {
            public_key: params.get("pbk").cloned(),
            short_id: params.get("sid").cloned(),
        })
    } else {
        None
    };

    // grpc has no extra options here
    let ws_opts = if network.as_deref() == Some("ws") {
        Some(WsOpts::new(
            params.get("path").cloned(),
            params.get("host").cloned(),
        ))
    } else {
        None
    };

    Some(VlessProxy {
        name,
        server,
        port,
        uuid: uuid.to_string(),
        tls: matches!(security, Some("tls") | Some("reality")),
        servername: params.get("sni").cloned(),
        network,
        client_fingerprint: params.get("fp").cloned(),
        flow: params.get("flow").cloned(),
        reality_opts,
        ws_opts,
        udp: None,
    })
}
