pub mod base64;
pub mod file;
pub mod http;
pub mod system;

pub use file::{file_exists, read_lines, write_atomic};
