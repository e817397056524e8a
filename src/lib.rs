pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod utils;

// Re-export the main proxy types for easier access
pub use models::{ClashType, ConfigOptions, Port, Proxy, ProxyType};

// Re-export the conversion pipeline
pub use generator::proxy_to_clash;
pub use interfaces::{convert, convert_with_options, Conversion, ConvertError};
pub use parser::{explode, explode_sub};
