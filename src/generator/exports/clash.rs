use std::collections::HashSet;

use log::{debug, error};
use serde_yaml::{Sequence, Value as YamlValue};

use crate::generator::GenerateError;
use crate::models::{ConfigOptions, Proxy};
use crate::utils::yaml::YamlNode;

/// Base configuration used when no template is supplied.
pub const DEFAULT_CLASH_TEMPLATE: &str = r#"
port: 7890
socks-port: 7891
allow-lan: true
mode: Rule
log-level: info
external-controller: :9090
proxies: []
proxy-groups:
  - name: "Select"
    type: select
    proxies:
      - "Auto"
      - "Fallback"
  - name: "Auto"
    type: url-test
    url: "http://www.gstatic.com/generate_204"
    interval: 300
    proxies: []
  - name: "Fallback"
    type: fallback
    url: "http://www.gstatic.com/generate_204"
    interval: 300
    proxies: []
rules:
  - GEOIP,CN,DIRECT
  - MATCH,Select
"#;

lazy_static::lazy_static! {
    /// Groups that receive every node name.
    static ref NODE_GROUPS: HashSet<&'static str> = HashSet::from(["Select", "Auto", "Fallback"]);
}

/// Convert proxies to Clash format
///
/// Loads the template from `options` (or [`DEFAULT_CLASH_TEMPLATE`]), replaces
/// its `proxies` with `nodes` and appends every node name to the `Select`,
/// `Auto` and `Fallback` groups.
///
/// This never fails: any error is rendered as a commented document so the
/// caller always gets text back.
pub fn proxy_to_clash(nodes: &[Proxy], options: &ConfigOptions) -> String {
    match try_proxy_to_clash(nodes, options) {
        Ok(output) => output,
        Err(e) => {
            error!("Config generation failed: {}", e);
            format!("# Config generation failed \n{}", e)
        }
    }
}

/// Fallible core of [`proxy_to_clash`].
pub fn try_proxy_to_clash(nodes: &[Proxy], options: &ConfigOptions) -> Result<String, GenerateError> {
    let template = options
        .template
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CLASH_TEMPLATE);
    if let Some(clash_type) = options.clash_type {
        // both dialects share one output for now
        debug!("Generating config for {}", clash_type.as_str());
    }

    let mut yaml_node = YamlNode::from_str(template).map_err(GenerateError::Template)?;
    let root = yaml_node
        .root_mapping_mut()
        .ok_or_else(|| GenerateError::InvalidTemplate("root is not a mapping".to_string()))?;

    let proxies = serde_yaml::to_value(nodes).map_err(GenerateError::Serialize)?;
    root.insert(YamlValue::from("proxies"), proxies);

    let names: Vec<YamlValue> = nodes.iter().map(|node| YamlValue::from(node.name())).collect();
    if let Some(groups) = root.get_mut("proxy-groups") {
        append_group_proxies(groups, &names)?;
    }

    yaml_node.to_string().map_err(GenerateError::Serialize)
}

fn append_group_proxies(groups: &mut YamlValue, names: &[YamlValue]) -> Result<(), GenerateError> {
    let groups = match groups {
        YamlValue::Sequence(groups) => groups,
        YamlValue::Null => return Ok(()),
        _ => {
            return Err(GenerateError::InvalidTemplate(
                "`proxy-groups` is not a list".to_string(),
            ))
        }
    };

    for group in groups.iter_mut() {
        let Some(group) = group.as_mapping_mut() else {
            continue;
        };
        let name = match group.get("name").and_then(YamlValue::as_str) {
            Some(name) if NODE_GROUPS.contains(name) => name.to_string(),
            _ => continue,
        };

        let proxies = group
            .entry(YamlValue::from("proxies"))
            .or_insert(YamlValue::Null);
        if proxies.is_null() {
            *proxies = YamlValue::Sequence(Sequence::new());
        }
        match proxies {
            YamlValue::Sequence(list) => list.extend(names.iter().cloned()),
            _ => {
                return Err(GenerateError::InvalidTemplate(format!(
                    "group `{}` has a `proxies` field that is not a list",
                    name
                )))
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Port, TrojanProxy};

    fn trojan(name: &str) -> Proxy {
        Proxy::Trojan(TrojanProxy {
            name: name.to_string(),
            server: "example.com".to_string(),
            port: Port::from(443),
            password: "pw".to_string(),
            sni: None,
            alpn: None,
            skip_cert_verify: false,
            udp: None,
            network: None,
            ws_opts: None,
        })
    }

    #[test]
    fn test_default_template_groups() {
        let output = try_proxy_to_clash(&[trojan("A")], &ConfigOptions::default()).unwrap();
        let node = YamlNode::from_str(&output).unwrap();

        assert_eq!(
            node.get_value("proxy-groups.0.proxies"),
            Some(&serde_yaml::from_str::<YamlValue>("[Auto, Fallback, A]").unwrap())
        );
        assert_eq!(
            node.get_value("proxy-groups.1.proxies.0"),
            Some(&YamlValue::from("A"))
        );
        assert_eq!(node.get_value("port").and_then(YamlValue::as_u64), Some(7890));
    }

    #[test]
    fn test_missing_and_null_group_proxies() {
        let template = "proxy-groups:\n  - name: Auto\n  - name: Fallback\n    proxies:\n  - name: Other\n";
        let options = ConfigOptions::default().with_template(template);
        let output = try_proxy_to_clash(&[trojan("A")], &options).unwrap();
        let node = YamlNode::from_str(&output).unwrap();

        assert_eq!(node.get_value("proxy-groups.0.proxies.0"), Some(&YamlValue::from("A")));
        assert_eq!(node.get_value("proxy-groups.1.proxies.0"), Some(&YamlValue::from("A")));
        assert!(node.get_value("proxy-groups.2.proxies").is_none());
    }

    #[test]
    fn test_non_list_group_proxies_is_an_error() {
        let options = ConfigOptions::default()
            .with_template("proxy-groups:\n  - name: Select\n    proxies: DIRECT\n");
        assert!(matches!(
            try_proxy_to_clash(&[trojan("A")], &options),
            Err(GenerateError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_empty_template_uses_default() {
        let options = ConfigOptions::default().with_template("");
        let output = proxy_to_clash(&[], &options);
        assert!(output.contains("socks-port: 7891"));
    }
}
