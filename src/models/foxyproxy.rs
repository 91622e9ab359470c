//! FoxyProxy configuration document
//!
//! Mirrors the JSON layout FoxyProxy imports and exports. Keys this crate
//! does not model are kept in `extra` so a loaded document is written back
//! without losing them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::pattern::CandidatePattern;
use super::pattern_set::PatternSet;

pub const DEFAULT_ENTRY_TITLE: &str = "auto";
pub const DEFAULT_PROXY_HOST: &str = "127.0.0.1";
pub const DEFAULT_PROXY_PORT: u16 = 10808;
const DEFAULT_COLOR: &str = "#0080ff";

/// Hostnames that must never be proxied: connectivity checks and
/// domestic sites that are known to break behind the tunnel.
const DEFAULT_EXCLUDED_HOSTS: [&str; 3] = ["msftconnecttest.com", "belling.com.cn", "tuchong.com"];

/// Local endpoint the default `auto` entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub hostname: String,
    pub port: u16,
}

impl Default for ProxyEndpoint {
    fn default() -> Self {
        ProxyEndpoint {
            hostname: DEFAULT_PROXY_HOST.to_string(),
            port: DEFAULT_PROXY_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Commands {
    pub set_proxy: String,
    pub set_tab_proxy: String,
    pub include_host: String,
    pub exclude_host: String,
}

/// One proxy definition with its include/exclude pattern lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEntry {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub proxy_type: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub cc: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub pac: String,
    #[serde(default)]
    pub pac_string: String,
    #[serde(rename = "proxyDNS", default)]
    pub proxy_dns: bool,
    pub include: PatternSet,
    #[serde(default)]
    pub exclude: Vec<CandidatePattern>,
    #[serde(default)]
    pub tab_proxy: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProxyEntry {
    /// The `auto` SOCKS5 entry seeded with the default exclusions.
    pub fn auto(endpoint: &ProxyEndpoint) -> Self {
        ProxyEntry {
            active: true,
            title: DEFAULT_ENTRY_TITLE.to_string(),
            proxy_type: "socks5".to_string(),
            hostname: endpoint.hostname.clone(),
            port: endpoint.port.to_string(),
            username: String::new(),
            password: String::new(),
            cc: String::new(),
            city: String::new(),
            color: DEFAULT_COLOR.to_string(),
            pac: String::new(),
            pac_string: String::new(),
            proxy_dns: true,
            include: PatternSet::new(),
            exclude: default_exclude_patterns(),
            tab_proxy: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Top-level FoxyProxy settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub sync: bool,
    #[serde(default)]
    pub auto_backup: bool,
    #[serde(default)]
    pub passthrough: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub container: Map<String, Value>,
    #[serde(default)]
    pub commands: Commands,
    pub data: Vec<ProxyEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigurationDocument {
    /// Builds a fresh document in pattern mode with a single `auto` entry.
    pub fn new_default(endpoint: &ProxyEndpoint) -> Self {
        ConfigurationDocument {
            mode: "pattern".to_string(),
            sync: false,
            auto_backup: false,
            passthrough: String::new(),
            theme: String::new(),
            container: Map::new(),
            commands: Commands::default(),
            data: vec![ProxyEntry::auto(endpoint)],
            extra: Map::new(),
        }
    }

    pub fn primary_mut(&mut self) -> Option<&mut ProxyEntry> {
        self.data.first_mut()
    }
}

impl Default for ConfigurationDocument {
    fn default() -> Self {
        ConfigurationDocument::new_default(&ProxyEndpoint::default())
    }
}

/// Private address ranges followed by the fixed host exclusions.
pub fn default_exclude_patterns() -> Vec<CandidatePattern> {
    let mut patterns = vec![
        CandidatePattern::regex("10.*.*.*", r"^(http|ws)s?://10(\.\d+){3}/"),
        CandidatePattern::regex("127.*.*.*", r"^(http|ws)s?://127(\.\d+){3}/"),
        CandidatePattern::regex("172.16.*.*", r"^(http|ws)s?://172\.16(\.\d+){2}/"),
        CandidatePattern::regex("192.168.*.*", r"^(http|ws)s?://192\.168(\.\d+){2}/"),
    ];
    patterns.extend(
        DEFAULT_EXCLUDED_HOSTS
            .iter()
            .map(|host| CandidatePattern::wildcard(host)),
    );
    patterns
}

// FoxyProxy writes the port as a string, older exports used a number.
fn deserialize_port<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "invalid port value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatternType;

    #[test]
    fn test_default_document_shape() {
        let doc = ConfigurationDocument::default();
        assert_eq!(doc.mode, "pattern");
        assert!(!doc.sync);
        assert!(!doc.auto_backup);
        assert_eq!(doc.data.len(), 1);

        let entry = &doc.data[0];
        assert_eq!(entry.title, "auto");
        assert_eq!(entry.proxy_type, "socks5");
        assert_eq!(entry.hostname, "127.0.0.1");
        assert_eq!(entry.port, "10808");
        assert!(entry.proxy_dns);
        assert!(entry.include.is_empty());
    }

    #[test]
    fn test_default_excludes() {
        let excludes = default_exclude_patterns();
        let regex: Vec<_> = excludes
            .iter()
            .filter(|p| p.pattern_type == PatternType::Regex)
            .collect();
        assert_eq!(regex.len(), 4);
        assert_eq!(regex[0].pattern, r"^(http|ws)s?://10(\.\d+){3}/");
        assert_eq!(regex[3].title, "192.168.*.*");

        let wildcard: Vec<_> = excludes
            .iter()
            .filter(|p| p.pattern_type == PatternType::Wildcard)
            .map(|p| p.pattern.as_str())
            .collect();
        assert_eq!(
            wildcard,
            vec!["*msftconnecttest.com*", "*belling.com.cn*", "*tuchong.com*"]
        );
    }

    #[test]
    fn test_json_keys_match_foxyproxy() {
        let value = serde_json::to_value(ConfigurationDocument::default()).unwrap();
        assert_eq!(value["autoBackup"], false);
        assert_eq!(value["commands"]["setTabProxy"], "");
        assert_eq!(value["data"][0]["proxyDNS"], true);
        assert_eq!(value["data"][0]["pacString"], "");
        assert!(value["data"][0]["tabProxy"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_numeric_port_and_unknown_keys_survive() {
        let json = r#"{
            "mode": "pattern",
            "browserVersion": 128,
            "data": [{"title": "auto", "port": 1080, "include": [], "id": "abc"}]
        }"#;
        let doc: ConfigurationDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.data[0].port, "1080");
        assert_eq!(doc.extra["browserVersion"], 128);
        assert_eq!(doc.data[0].extra["id"], "abc");

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["browserVersion"], 128);
        assert_eq!(back["data"][0]["id"], "abc");
    }
}
