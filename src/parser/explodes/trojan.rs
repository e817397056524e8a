use log::warn;

use super::common::{remark_or_default, split_host_port, split_query, split_remark};
use crate::models::{Proxy, ProxyType, TrojanProxy, WsOpts};

/// Parse a Trojan link into a Proxy object
///
/// Format: `trojan://password@server:port?sni=...&type=ws&path=...#remark`
pub fn explode_trojan(trojan: &str) -> Option<Proxy> {
    let node = parse_trojan(trojan);
    if node.is_none() {
        warn!("Error parsing Trojan link: {}", trojan);
    }
    node.map(Proxy::Trojan)
}

fn parse_trojan(trojan: &str) -> Option<TrojanProxy> {
    let content = trojan.strip_prefix("trojan://")?;
    let (content, remark) = split_remark(content)?;
    let name = remark_or_default(remark, ProxyType::Trojan);

    let (password, server_info) = content.split_once('@')?;
    let (address, params) = split_query(server_info)?;
    let (server, port) = split_host_port(address)?;

    // SNI may be given as either "sni" or "peer"
    let sni = params.get("sni").or_else(|| params.get("peer")).cloned();
    let skip_cert_verify = params.get("allowInsecure").map(String::as_str) == Some("1");
    let network = params.get("type").cloned();

    let ws_opts = if network.as_deref() == Some("ws") {
        Some(WsOpts::new(
            params.get("path").cloned(),
            params.get("host").cloned(),
        ))
    } else {
        None
    };

    Some(TrojanProxy {
        name,
        server,
        port,
        password: password.to_string(),
        sni,
        alpn: None,
        skip_cert_verify,
        udp: None,
        network,
        ws_opts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Port;

    fn trojan(link: &str) -> TrojanProxy {
        match explode_trojan(link) {
            Some(Proxy::Trojan(node)) => node,
            other => panic!("expected a trojan node, got {:?}", other),
        }
    }

    #[test]
    fn test_explode_trojan_basic() {
        let node = trojan("trojan://password@example.com:443#Example%20Trojan");

        assert_eq!(node.password, "password");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, Port::Number(443));
        assert_eq!(node.name, "Example Trojan");
        assert!(!node.skip_cert_verify);
        assert!(node.sni.is_none());
        assert!(node.ws_opts.is_none());
    }

    #[test]
    fn test_explode_trojan_default_name() {
        assert_eq!(trojan("trojan://pw@example.com:443").name, "Trojan");
        assert_eq!(trojan("trojan://pw@example.com:443#").name, "Trojan");
    }

    #[test]
    fn test_explode_trojan_peer_and_insecure() {
        let node = trojan("trojan://pw@example.com:443?peer=peer.example.com&allowInsecure=1");
        assert_eq!(node.sni.as_deref(), Some("peer.example.com"));
        assert!(node.skip_cert_verify);

        let node = trojan(
            "trojan://pw@example.com:443?sni=sni.example.com&peer=peer.example.com&allowInsecure=true",
        );
        assert_eq!(node.sni.as_deref(), Some("sni.example.com"));
        assert!(!node.skip_cert_verify);
    }

    #[test]
    fn test_explode_trojan_websocket() {
        let node = trojan(
            "trojan://pw@example.com:443?type=ws&path=%2Fws&host=cdn.example.com#WS",
        );
        assert_eq!(node.network.as_deref(), Some("ws"));
        let ws = node.ws_opts.expect("ws opts");
        assert_eq!(ws.path.as_deref(), Some("/ws"));
        assert_eq!(
            ws.headers.and_then(|h| h.get("Host").cloned()).as_deref(),
            Some("cdn.example.com")
        );

        let ws = trojan("trojan://pw@example.com:443?type=ws")
            .ws_opts
            .expect("ws opts");
        assert!(ws.path.is_none());
        assert!(ws.headers.is_none());
    }

    #[test]
    fn test_explode_trojan_ipv6_uses_last_colon() {
        let node = trojan("trojan://pw@[2001:db8::1]:8443?sni=a.com");
        assert_eq!(node.server, "[2001:db8::1]");
        assert_eq!(node.port, Port::Number(8443));
    }

    #[test]
    fn test_explode_trojan_invalid() {
        assert!(explode_trojan("trojan://example.com:443").is_none());
        assert!(explode_trojan("trojan://pw@example.com").is_none());
    }
}
