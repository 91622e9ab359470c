use std::time::Duration;

use reqwest::{Client, Proxy};

use crate::utils::system::get_system_proxy;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT: u64 = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub proxy: Option<String>,
}

/// Parses an upstream proxy setting: `SYSTEM`, `NONE`/empty, or a proxy URL.
pub fn parse_proxy(proxy_str: &str) -> ProxyConfig {
    if proxy_str == "SYSTEM" {
        let system = get_system_proxy();
        return ProxyConfig {
            proxy: (!system.is_empty()).then_some(system),
        };
    } else if proxy_str == "NONE" {
        return ProxyConfig { proxy: None };
    } else if !proxy_str.is_empty() {
        return ProxyConfig {
            proxy: Some(proxy_str.to_string()),
        };
    }
    ProxyConfig { proxy: None }
}

/// Makes an HTTP GET request to the specified URL
///
/// # Arguments
/// * `url` - The URL to request
/// * `proxy_config` - Upstream proxy to route the request through
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(String)` - Error message if the request failed or the status was not 2xx
pub async fn web_get_async(url: &str, proxy_config: &ProxyConfig) -> Result<String, String> {
    let mut client_builder = Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
        .user_agent(concat!("foxyrules/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = &proxy_config.proxy {
        match Proxy::all(proxy) {
            Ok(proxy) => {
                client_builder = client_builder.proxy(proxy);
            }
            Err(e) => {
                return Err(format!("Failed to set proxy: {}", e));
            }
        }
    }

    let client = client_builder
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response body: {}", e))
}

/// Synchronous version of web_get_async that uses tokio runtime to run the async function
pub fn web_get(url: &str, proxy_config: &ProxyConfig) -> Result<String, String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    rt.block_on(web_get_async(url, proxy_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proxy() {
        assert_eq!(parse_proxy("NONE"), ProxyConfig { proxy: None });
        assert_eq!(parse_proxy(""), ProxyConfig { proxy: None });
        assert_eq!(
            parse_proxy("socks5://127.0.0.1:1080").proxy.as_deref(),
            Some("socks5://127.0.0.1:1080")
        );
    }
}
