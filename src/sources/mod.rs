//! Rule sources: the remote filter list, the local rule file and
//! operator input.

use std::io::BufRead;
use std::path::Path;

use log::{info, warn};

use crate::error::{AppError, Result};
use crate::utils::base64::base64_decode;
use crate::utils::file::read_lines;
use crate::utils::http::{web_get, ProxyConfig};

pub const GFWLIST_URL: &str = "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt";

/// Fetches the Base64 filter list and returns its decoded text.
pub fn fetch_filter_list(url: &str, proxy: &ProxyConfig) -> Result<String> {
    info!("Fetching filter list from: {}", url);
    let body = web_get(url, proxy).map_err(AppError::Fetch)?;
    decode_filter_list(&body)
}

/// Decodes a Base64 filter-list body.
pub fn decode_filter_list(body: &str) -> Result<String> {
    base64_decode(body).map_err(AppError::Decode)
}

/// Reads candidate URLs from the local rule file.
///
/// A missing file contributes no rules.
pub fn read_rule_file(path: &Path) -> Result<Vec<String>> {
    match read_lines(path)? {
        Some(lines) => {
            info!("Read {} URLs from '{}'", lines.len(), path.display());
            Ok(lines)
        }
        None => {
            info!("Custom rule file '{}' not found, skipping", path.display());
            Ok(Vec::new())
        }
    }
}

/// Reads one line of comma or space separated URLs from `reader`.
pub fn read_interactive<R: BufRead>(reader: &mut R) -> Result<Vec<String>> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let urls = crate::rules::split_interactive_input(&line);
    if urls.is_empty() {
        warn!("No URLs entered");
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_decode_filter_list() {
        let body = base64_encode("! header\n||foo.com\n");
        assert_eq!(decode_filter_list(&body).unwrap(), "! header\n||foo.com\n");
        assert!(matches!(decode_filter_list("%%%"), Err(AppError::Decode(_))));
    }

    #[test]
    fn test_missing_rule_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(read_rule_file(&dir.path().join("new_list.txt")).unwrap().is_empty());
    }

    #[test]
    fn test_read_interactive() {
        let mut input = Cursor::new("a.com, https://b.org/x c.net\nignored.com\n");
        assert_eq!(
            read_interactive(&mut input).unwrap(),
            vec!["a.com", "https://b.org/x", "c.net"]
        );
        assert!(read_interactive(&mut Cursor::new("")).unwrap().is_empty());
    }
}
