use std::collections::HashMap;

use log::debug;

use crate::models::{Port, Proxy, ProxyType};
use crate::utils::base64::safe_base64_decode;
use crate::utils::url::{parse_query_params, url_decode};

/// Prefixes that mark a subscription as plain text. Anything else is treated
/// as a Base64 blob first. `vless://` is intentionally absent.
const PLAIN_SUB_PREFIXES: [&str; 3] = ["ss://", "vmess://", "trojan://"];

/// Explode a proxy link into a Proxy object
///
/// This function detects the type of proxy link and calls the appropriate parser.
/// Blank lines and unknown schemes yield `None`.
pub fn explode(link: &str) -> Option<Proxy> {
    let link = link.trim();

    if link.starts_with("ss://") {
        super::ss::explode_ss(link)
    } else if link.starts_with("vmess://") {
        super::vmess::explode_vmess(link)
    } else if link.starts_with("trojan://") {
        super::trojan::explode_trojan(link)
    } else if link.starts_with("vless://") {
        super::vless::explode_vless(link)
    } else {
        if !link.is_empty() {
            debug!("Skipping unsupported link: {}", link);
        }
        None
    }
}

/// Explode a subscription content into a vector of Proxy objects
///
/// The content may be a newline-separated list of links or a Base64 blob
/// wrapping one. Lines that fail to parse are dropped; the order of the
/// remaining links is kept.
pub fn explode_sub(sub: &str) -> Vec<Proxy> {
    let sub = sub.trim();

    let content = if PLAIN_SUB_PREFIXES.iter().any(|p| sub.starts_with(p)) {
        sub.to_string()
    } else {
        safe_base64_decode(sub)
    };

    content.split('\n').filter_map(explode).collect()
}

/// Splits a link body on its last `#` into the payload and the decoded label.
/// A label that is not valid percent-encoding fails the whole link.
pub(crate) fn split_remark(link: &str) -> Option<(&str, Option<String>)> {
    match link.rfind('#') {
        Some(pos) => Some((&link[..pos], Some(url_decode(&link[pos + 1..])?))),
        None => Some((link, None)),
    }
}

/// The label if it is non-empty, else the scheme's default name.
pub(crate) fn remark_or_default(remark: Option<String>, proxy_type: ProxyType) -> String {
    remark
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| proxy_type.default_name().to_string())
}

/// Splits `host:port` on the last `:`. The host must be non-empty; the port
/// is parsed leniently.
pub(crate) fn split_host_port(address: &str) -> Option<(String, Port)> {
    let (host, port) = address.rsplit_once(':')?;
    if host.is_empty() {
        return None;
    }
    Some((host.to_string(), Port::parse(port)))
}

/// Splits `host:port?query` into the address and its query parameters.
pub(crate) fn split_query(server_info: &str) -> Option<(&str, HashMap<String, String>)> {
    match server_info.split_once('?') {
        Some((address, _)) => Some((address, parse_query_params(server_info)?)),
        None => Some((server_info, HashMap::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_blank_and_unknown() {
        assert!(explode("").is_none());
        assert!(explode("   ").is_none());
        assert!(explode("unknown://x").is_none());
        assert!(explode("ssr://abc").is_none());
        assert!(explode("hysteria2://pw@host:443").is_none());
    }

    #[test]
    fn test_split_remark_uses_last_hash() {
        let (payload, remark) = split_remark("pw#x@host:443#My%20Node").unwrap();
        assert_eq!(payload, "pw#x@host:443");
        assert_eq!(remark.as_deref(), Some("My Node"));

        let (payload, remark) = split_remark("pw@host:443").unwrap();
        assert_eq!(payload, "pw@host:443");
        assert!(remark.is_none());
    }

    #[test]
    fn test_split_remark_bad_escape() {
        assert!(split_remark("pw@host:443#%E4%BD").is_none());
        assert!(split_remark("pw@host:443#100%").is_none());
    }

    #[test]
    fn test_explode_drops_badly_encoded_links() {
        assert!(explode("trojan://pw@h.com:443#%E4%BD").is_none());
        assert!(explode("trojan://pw@h.com:443?sni=%ZZ#ok").is_none());
        assert!(explode("vless://id@h.com:443?sni=%ZZ#ok").is_none());
        assert!(explode("trojan://pw@h.com:443?sni=a.com#ok").is_some());
    }

    #[test]
    fn test_remark_or_default() {
        assert_eq!(
            remark_or_default(Some(String::new()), ProxyType::Trojan),
            "Trojan"
        );
        assert_eq!(remark_or_default(None, ProxyType::Vless), "Vless");
        assert_eq!(
            remark_or_default(Some("HK".to_string()), ProxyType::Vless),
            "HK"
        );
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(
            split_host_port("example.com:443"),
            Some(("example.com".to_string(), Port::Number(443)))
        );
        assert_eq!(
            split_host_port("[2001:db8::1]:8443"),
            Some(("[2001:db8::1]".to_string(), Port::Number(8443)))
        );
        assert_eq!(
            split_host_port("example.com:abc"),
            Some(("example.com".to_string(), Port::NaN))
        );
        assert!(split_host_port("example.com").is_none());
        assert!(split_host_port(":443").is_none());
    }

    #[test]
    fn test_split_query() {
        let (address, params) = split_query("example.com:443?sni=a.com&type=ws").unwrap();
        assert_eq!(address, "example.com:443");
        assert_eq!(params["sni"], "a.com");
        assert_eq!(params["type"], "ws");

        let (address, params) = split_query("example.com:443").unwrap();
        assert_eq!(address, "example.com:443");
        assert!(params.is_empty());

        assert!(split_query("example.com:443?sni=%ZZ").is_none());
    }
}
