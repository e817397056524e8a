pub mod base64;
pub mod file;
pub mod url;
pub mod yaml;

// Re-export common utilities
pub use self::base64::safe_base64_decode;
pub use self::url::{parse_query_params, url_decode};
pub use yaml::YamlNode;
