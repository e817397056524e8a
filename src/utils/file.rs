use std::path::Path;

/// Checks if a file exists at the given path
pub fn file_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Reads a template document from disk.
pub fn load_template(path: &str) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
