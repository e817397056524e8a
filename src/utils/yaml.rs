use serde_yaml::{self, Mapping, Value};

/// Wrapper around serde_yaml::Value for easier manipulation
#[derive(Debug, Clone)]
pub struct YamlNode {
    pub value: Value,
}

impl YamlNode {
    /// Create a new empty YAML node
    pub fn new() -> Self {
        YamlNode { value: Value::Null }
    }

    /// Create a YamlNode from a YAML string
    pub fn from_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let value = serde_yaml::from_str(content)?;
        Ok(YamlNode { value })
    }

    /// Convert the YAML node to a string
    pub fn to_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.value)
    }

    /// Get a value from a dotted path, e.g. `proxy-groups.0.name`
    pub fn get_value(&self, path: &str) -> Option<&Value> {
        let mut current = &self.value;

        for part in path.split('.') {
            if part.is_empty() {
                continue;
            }

            match current {
                Value::Mapping(map) => {
                    current = map.get(part)?;
                }
                Value::Sequence(seq) => {
                    let index = part.parse::<usize>().ok()?;
                    current = seq.get(index)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    /// Root mapping of the document. A null document (empty text) becomes an
    /// empty mapping; any other non-mapping root yields `None`.
    pub fn root_mapping_mut(&mut self) -> Option<&mut Mapping> {
        if self.value.is_null() {
            self.value = Value::Mapping(Mapping::new());
        }
        self.value.as_mapping_mut()
    }
}

impl Default for YamlNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_value_by_path() {
        let node = YamlNode::from_str(
            "port: 7890\nproxy-groups:\n  - name: Select\n    proxies: [DIRECT]\n",
        )
        .unwrap();
        assert_eq!(node.get_value("port").and_then(Value::as_u64), Some(7890));
        assert_eq!(
            node.get_value("proxy-groups.0.name"),
            Some(&Value::from("Select"))
        );
        assert_eq!(
            node.get_value("proxy-groups.0.proxies.0"),
            Some(&Value::from("DIRECT"))
        );
        assert!(node.get_value("proxy-groups.1").is_none());
        assert!(node.get_value("port.x").is_none());
    }

    #[test]
    fn test_root_mapping_of_null_document() {
        let mut node = YamlNode::new();
        assert!(node.root_mapping_mut().is_some());
        assert!(node.value.is_mapping());
    }

    #[test]
    fn test_root_mapping_of_scalar_document() {
        let mut node = YamlNode::from_str("just a string").unwrap();
        assert!(node.root_mapping_mut().is_none());
    }
}
