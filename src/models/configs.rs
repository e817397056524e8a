use std::str::FromStr;

/// Clash dialect the output is meant for.
///
/// Accepted for forward compatibility; both dialects currently produce the
/// same document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClashType {
    #[default]
    Clash,
    Meta,
}

impl ClashType {
    pub fn as_str(self) -> &'static str {
        match self {
            ClashType::Clash => "clash",
            ClashType::Meta => "meta",
        }
    }
}

impl FromStr for ClashType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clash" => Ok(ClashType::Clash),
            "meta" | "mihomo" => Ok(ClashType::Meta),
            other => Err(format!("unknown clash type: {}", other)),
        }
    }
}

/// Options for config generation
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Template document text; `None` or empty uses the built-in template
    pub template: Option<String>,
    pub clash_type: Option<ClashType>,
}

impl ConfigOptions {
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_clash_type(mut self, clash_type: ClashType) -> Self {
        self.clash_type = Some(clash_type);
        self
    }
}
