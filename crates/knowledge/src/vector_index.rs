//! Vector index abstraction for the trade knowledge store.
//!
//! Defines a trait for provider-agnostic vector storage and retrieval and
//! its Pinecone implementation (REST data plane, control plane for host
//! and dimension lookup).

use crate::embeddings::providers::pinecone::{PINECONE_API_URL, PINECONE_API_VERSION};
use crate::types::{IndexStats, RecordMetadata, ScoredMatch, VectorRecord};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tradebot_core::{AppError, AppResult};

/// Maximum vectors per upsert request.
const UPSERT_CHUNK: usize = 100;

/// Trait for vector index backends.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Search for the `top_k` most similar records to `vector`.
    ///
    /// Returns matches ordered by descending score.
    async fn query(
        &self,
        vector: &[f32],
        top_k: u32,
        include_metadata: bool,
    ) -> AppResult<Vec<ScoredMatch>>;

    /// Insert or update records. Returns the number upserted.
    async fn upsert(&self, records: &[VectorRecord]) -> AppResult<usize>;

    /// Dimension and record count of the index.
    async fn describe(&self) -> AppResult<IndexStats>;
}

/// Pinecone serverless/pod index reached over REST.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    client: Client,
    api_key: String,
    host: String,
    dimension: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
    dimension: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: u32,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<UpsertVector<'a>>,
}

#[derive(Debug, Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a RecordMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    #[serde(default)]
    dimension: usize,
    #[serde(default)]
    total_vector_count: u64,
}

impl PineconeIndex {
    /// Connect to an index by name, resolving its host from the control
    /// plane unless `index_host` is given.
    pub async fn connect(
        api_key: &str,
        index_name: &str,
        index_host: Option<&str>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = build_client(timeout)?;

        if let Some(host) = index_host {
            return Ok(Self {
                client,
                api_key: api_key.to_string(),
                host: normalize_host(host),
                dimension: None,
            });
        }

        let url = format!("{}/indexes/{}", PINECONE_API_URL, urlencoding::encode(index_name));
        tracing::debug!("Resolving Pinecone index host via {}", url);

        let response = client
            .get(&url)
            .header("Api-Key", api_key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Pinecone describe_index failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Knowledge(format!(
                "Pinecone index '{}' unavailable ({}): {}",
                index_name, status, body
            )));
        }

        let description: IndexDescription = response.json().await.map_err(|e| {
            AppError::Knowledge(format!("Failed to parse Pinecone index description: {}", e))
        })?;

        tracing::info!(
            "Connected to Pinecone index '{}' at {}",
            index_name,
            description.host
        );

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            host: normalize_host(&description.host),
            dimension: description.dimension,
        })
    }

    /// Data-plane base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Dimension reported by the control plane, if it was consulted.
    pub fn known_dimension(&self) -> Option<usize> {
        self.dimension
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> AppResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.host, path);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Pinecone request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Knowledge(format!(
                "Pinecone {} error ({}): {}",
                path, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to parse Pinecone {} response: {}", path, e)))
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: u32,
        include_metadata: bool,
    ) -> AppResult<Vec<ScoredMatch>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata,
            include_values: false,
        };

        let response: QueryResponse = self.post("/query", &request).await?;
        tracing::debug!("Pinecone returned {} matches", response.matches.len());
        Ok(into_matches(response))
    }

    async fn upsert(&self, records: &[VectorRecord]) -> AppResult<usize> {
        let mut upserted = 0;

        for chunk in records.chunks(UPSERT_CHUNK) {
            let request = UpsertRequest {
                vectors: chunk
                    .iter()
                    .map(|r| UpsertVector {
                        id: &r.id,
                        values: &r.values,
                        metadata: &r.metadata,
                    })
                    .collect(),
            };

            let response: UpsertResponse = self.post("/vectors/upsert", &request).await?;
            upserted += response.upserted_count;
        }

        Ok(upserted)
    }

    async fn describe(&self) -> AppResult<IndexStats> {
        let stats: StatsResponse = self
            .post("/describe_index_stats", &serde_json::json!({}))
            .await?;

        Ok(IndexStats {
            dimension: stats.dimension,
            total_vector_count: stats.total_vector_count,
        })
    }
}

fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Knowledge(format!("Failed to create HTTP client for Pinecone: {}", e)))
}

/// Hosts from the control plane come without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

fn into_matches(response: QueryResponse) -> Vec<ScoredMatch> {
    response
        .matches
        .into_iter()
        .map(|m| {
            let field = |name: &str| {
                m.metadata
                    .as_ref()
                    .and_then(|meta| meta.get(name))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            };
            ScoredMatch {
                text: field("text"),
                source: field("source"),
                id: m.id.clone(),
                score: m.score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("chatbot-comercio-abc.svc.pinecone.io"),
            "https://chatbot-comercio-abc.svc.pinecone.io"
        );
        assert_eq!(normalize_host("http://localhost:5080/"), "http://localhost:5080");
    }

    #[test]
    fn test_query_request_is_camel_case() {
        let vector = [0.1, 0.2];
        let json = serde_json::to_value(QueryRequest {
            vector: &vector,
            top_k: 3,
            include_metadata: true,
            include_values: false,
        })
        .unwrap();

        assert_eq!(json["topK"], 3);
        assert_eq!(json["includeMetadata"], true);
        assert_eq!(json["includeValues"], false);
    }

    #[test]
    fn test_into_matches_reads_metadata() {
        let response: QueryResponse = serde_json::from_value(serde_json::json!({
            "matches": [
                {"id": "a", "score": 0.91, "metadata": {"text": "Arancel es un impuesto", "source": "wiki"}},
                {"id": "b", "score": 0.42}
            ],
            "namespace": ""
        }))
        .unwrap();

        let matches = into_matches(response);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text.as_deref(), Some("Arancel es un impuesto"));
        assert_eq!(matches[0].source.as_deref(), Some("wiki"));
        assert_eq!(matches[1].text, None);
        assert!((matches[1].score - 0.42).abs() < f32::EPSILON);
    }

    #[test]
    fn test_upsert_vector_shape() {
        let record = VectorRecord {
            id: "abc".to_string(),
            values: vec![0.5, 0.5],
            metadata: RecordMetadata {
                text: "Incoterms 2020".to_string(),
                source: "docs/incoterms.pdf".to_string(),
                ingested_at: Utc::now(),
            },
        };
        let json = serde_json::to_value(UpsertVector {
            id: &record.id,
            values: &record.values,
            metadata: &record.metadata,
        })
        .unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["metadata"]["text"], "Incoterms 2020");
        assert_eq!(json["metadata"]["source"], "docs/incoterms.pdf");
        assert!(json["metadata"]["ingested_at"].is_string());
    }

    #[tokio::test]
    async fn test_connect_with_host_skips_lookup() {
        let index = PineconeIndex::connect(
            "pc-test",
            "chatbot-comercio",
            Some("idx.svc.pinecone.io"),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(index.host(), "https://idx.svc.pinecone.io");
        assert_eq!(index.known_dimension(), None);
    }
}
