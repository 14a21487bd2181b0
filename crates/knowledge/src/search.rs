//! Web search collaborator.
//!
//! Uses the DuckDuckGo instant-answer JSON API. Queries are first restricted
//! to official trade and customs domains; when that yields nothing the
//! unrestricted query is tried.

use crate::types::WebResult;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tradebot_core::{AppError, AppResult};

const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com/";

/// Government and intergovernmental domains searched first.
pub const OFFICIAL_DOMAINS: [&str; 7] = [
    "wto.org",
    "trade.gov",
    "comercio.gob.es",
    "agenciatributaria.gob.es",
    "europa.eu",
    "unctad.org",
    "wcoomd.org",
];

/// A web-search backend.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Name reported in service status and logs.
    fn name(&self) -> &str;

    /// Search and return at most `max_results` results.
    async fn search(&self, query: &str, max_results: usize) -> AppResult<Vec<WebResult>>;
}

/// DuckDuckGo instant-answer search biased toward official domains.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
    domains: Vec<String>,
    biased_timeout: Duration,
}

impl DuckDuckGoSearch {
    /// `timeout` bounds the whole search. The official-domain request gets
    /// half of it so the unrestricted fallback can still run.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tradebot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Search(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DUCKDUCKGO_URL.to_string(),
            domains: OFFICIAL_DOMAINS.iter().map(|d| d.to_string()).collect(),
            biased_timeout: timeout / 2,
        })
    }

    /// Point at another instant-answer compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Budget of the official-domain request.
    pub fn biased_timeout(&self) -> Duration {
        self.biased_timeout
    }

    /// Replace the preferred domain list.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    async fn fetch(&self, query: &str, timeout: Option<Duration>) -> AppResult<Vec<WebResult>> {
        let url = format!(
            "{}?q={}&format=json&no_redirect=1&no_html=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Search(format!("DuckDuckGo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Search(format!(
                "DuckDuckGo search failed: {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Invalid DuckDuckGo response: {}", e)))?;

        Ok(parse_results(&payload))
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, max_results: usize) -> AppResult<Vec<WebResult>> {
        let query = query.trim();
        if query.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        if let Some(biased) = biased_query(query, &self.domains) {
            match self.fetch(&biased, Some(self.biased_timeout)).await {
                Ok(results) if !results.is_empty() => {
                    tracing::debug!("Official-domain search returned {} results", results.len());
                    return Ok(truncate(results, max_results));
                }
                Ok(_) => tracing::debug!("No official-domain results, widening search"),
                Err(e) => tracing::warn!("Official-domain search failed: {}", e),
            }
        }

        let results = self.fetch(query, None).await?;
        tracing::debug!("Unrestricted search returned {} results", results.len());
        Ok(truncate(results, max_results))
    }
}

/// `query (site:a OR site:b ...)`, or `None` without domains.
pub fn biased_query(query: &str, domains: &[String]) -> Option<String> {
    if domains.is_empty() {
        return None;
    }

    let sites = domains
        .iter()
        .map(|d| format!("site:{}", d))
        .collect::<Vec<_>>()
        .join(" OR ");
    Some(format!("{} ({})", query, sites))
}

fn truncate(mut results: Vec<WebResult>, max_results: usize) -> Vec<WebResult> {
    results.truncate(max_results);
    results
}

/// Extract results from an instant-answer payload.
///
/// The abstract comes first, then direct results, then related topics
/// (nested topic groups are flattened).
pub fn parse_results(payload: &Value) -> Vec<WebResult> {
    let mut results = Vec::new();

    let abstract_text = payload
        .get("AbstractText")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if !abstract_text.is_empty() {
        let heading = payload
            .get("Heading")
            .and_then(|v| v.as_str())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| abstract_text.split(" - ").next().unwrap_or(abstract_text));
        results.push(WebResult {
            title: heading.to_string(),
            body: abstract_text.to_string(),
            url: payload
                .get("AbstractURL")
                .and_then(|v| v.as_str())
                .filter(|u| !u.is_empty())
                .map(str::to_string),
        });
    }

    if let Some(items) = payload.get("Results").and_then(|v| v.as_array()) {
        collect_topics(items, &mut results);
    }
    if let Some(items) = payload.get("RelatedTopics").and_then(|v| v.as_array()) {
        collect_topics(items, &mut results);
    }

    results
}

fn collect_topics(items: &[Value], results: &mut Vec<WebResult>) {
    for item in items {
        if let Some(topics) = item.get("Topics").and_then(|v| v.as_array()) {
            collect_topics(topics, results);
            continue;
        }

        let text = item.get("Text").and_then(|v| v.as_str()).unwrap_or("");
        if text.is_empty() {
            continue;
        }

        results.push(WebResult {
            title: text.split(" - ").next().unwrap_or(text).to_string(),
            body: text.to_string(),
            url: item
                .get("FirstURL")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one JSON payload, leaving the first connection unanswered.
    async fn stalling_endpoint(payload: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stalled, _) = listener.accept().await.unwrap();
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                payload.len(),
                payload
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            drop(stalled);
        });

        format!("http://{}/", addr)
    }

    #[test]
    fn test_biased_query() {
        let domains = vec!["wto.org".to_string(), "europa.eu".to_string()];
        assert_eq!(
            biased_query("arancel", &domains).unwrap(),
            "arancel (site:wto.org OR site:europa.eu)"
        );
        assert_eq!(biased_query("arancel", &[]), None);
    }

    #[test]
    fn test_official_domains_in_default_bias() {
        let search = DuckDuckGoSearch::new(Duration::from_secs(5)).unwrap();
        let query = biased_query("incoterms", &search.domains).unwrap();
        for domain in OFFICIAL_DOMAINS {
            assert!(query.contains(&format!("site:{}", domain)));
        }
    }

    #[test]
    fn test_parse_results_abstract_and_topics() {
        let payload = json!({
            "Heading": "Arancel",
            "AbstractText": "Un arancel es un impuesto aplicado a los bienes importados.",
            "AbstractURL": "https://es.wikipedia.org/wiki/Arancel",
            "Results": [],
            "RelatedTopics": [
                {"Text": "Arancel aduanero - Tarifa oficial", "FirstURL": "https://example.org/a"},
                {"Name": "Ver también", "Topics": [
                    {"Text": "Aduana - Oficina pública", "FirstURL": "https://example.org/b"}
                ]},
                {"Text": "", "FirstURL": "https://example.org/empty"}
            ]
        });

        let results = parse_results(&payload);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Arancel");
        assert_eq!(results[0].url.as_deref(), Some("https://es.wikipedia.org/wiki/Arancel"));
        assert_eq!(results[1].title, "Arancel aduanero");
        assert_eq!(results[1].body, "Arancel aduanero - Tarifa oficial");
        assert_eq!(results[2].title, "Aduana");
    }

    #[test]
    fn test_parse_results_empty_payload() {
        assert!(parse_results(&json!({})).is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        let search = DuckDuckGoSearch::new(Duration::from_secs(5)).unwrap();
        assert!(search.search("   ", 3).await.unwrap().is_empty());
        assert!(search.search("arancel", 0).await.unwrap().is_empty());
        assert_eq!(search.name(), "duckduckgo");
    }

    #[test]
    fn test_with_domains() {
        let search = DuckDuckGoSearch::new(Duration::from_secs(5))
            .unwrap()
            .with_domains(["wto.org"]);
        assert_eq!(search.domains, vec!["wto.org".to_string()]);
    }

    #[test]
    fn test_biased_request_gets_half_the_budget() {
        let search = DuckDuckGoSearch::new(Duration::from_secs(25)).unwrap();
        assert_eq!(search.biased_timeout(), Duration::from_millis(12_500));
    }

    #[tokio::test]
    async fn test_stalled_official_search_falls_back_in_budget() {
        let payload = json!({
            "Heading": "Arancel",
            "AbstractText": "Impuesto aplicado a las importaciones.",
            "AbstractURL": "https://es.wikipedia.org/wiki/Arancel"
        })
        .to_string();
        let base_url = stalling_endpoint(payload).await;
        let budget = Duration::from_secs(2);
        let search = DuckDuckGoSearch::new(budget).unwrap().with_base_url(base_url);

        let results = tokio::time::timeout(budget, search.search("arancel", 3))
            .await
            .expect("search exceeded its budget")
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Arancel");
    }
}
