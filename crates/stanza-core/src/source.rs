//! Poem sources
//!
//! A source produces the raw poem list a formatter consumes. PoetryDB is
//! the real one; [`FileSource`] replays a saved response for offline use.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::poem::PoemRecord;

/// Something that can hand out poem records
#[async_trait]
pub trait PoemSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Fetch one batch of poems
    async fn fetch(&self) -> Result<Vec<PoemRecord>>;
}

/// PoetryDB query for random poems
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemQuery {
    /// API root, e.g. `https://poetrydb.org`
    pub base_url: String,
    /// How many random poems to request
    pub count: u32,
    /// Exact line count filter
    pub line_count: Option<u32>,
}

impl PoemQuery {
    /// Build the request URL.
    ///
    /// PoetryDB joins input fields with `,` and their values with `;`, so
    /// `random,linecount/1;12` means "one random poem with 12 lines".
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match self.line_count {
            Some(lines) => format!(
                "{base}/random,linecount/{};{lines}/author,title,lines.json",
                self.count
            ),
            None => format!("{base}/random/{}/author,title,lines.json", self.count),
        }
    }
}

impl From<&SourceConfig> for PoemQuery {
    fn from(config: &SourceConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            count: config.count,
            line_count: config.line_count,
        }
    }
}

impl Default for PoemQuery {
    fn default() -> Self {
        Self::from(&SourceConfig::default())
    }
}

/// Body shapes PoetryDB answers with
#[derive(Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Poems(Vec<PoemRecord>),
    // Misses come back as `{"status": 404, "reason": "Not found"}`,
    // sometimes with the status as a string
    Status {
        status: serde_json::Value,
        reason: String,
    },
}

/// Decode a PoetryDB response body into its poem list.
pub fn parse_response(body: &str) -> Result<Vec<PoemRecord>> {
    match serde_json::from_str::<ApiResponse>(body)? {
        ApiResponse::Poems(poems) => Ok(poems),
        ApiResponse::Status { status, reason } => {
            let status = status
                .as_u64()
                .or_else(|| status.as_str().and_then(|s| s.parse().ok()))
                .and_then(|code| u16::try_from(code).ok())
                .unwrap_or(0);
            Err(Error::Api { status, reason })
        }
    }
}

/// PoetryDB over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    query: PoemQuery,
}

impl HttpSource {
    /// Create a source for `query`
    pub fn new(query: PoemQuery, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, query })
    }

    /// Create a source from the `source` config section
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(
            PoemQuery::from(config),
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    /// URL requested on every fetch
    pub fn url(&self) -> String {
        self.query.url()
    }
}

#[async_trait]
impl PoemSource for HttpSource {
    fn name(&self) -> &str {
        "poetrydb"
    }

    async fn fetch(&self) -> Result<Vec<PoemRecord>> {
        let url = self.url();
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Received {} ({} bytes)", status, body.len());

        if !status.is_success() {
            // Prefer the API's own explanation when the body carries one
            return match parse_response(&body) {
                Err(err @ Error::Api { .. }) => Err(err),
                _ => Err(Error::Api {
                    status: status.as_u16(),
                    reason: status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string(),
                }),
            };
        }

        parse_response(&body)
    }
}

/// Saved PoetryDB response on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read poems from `path` on every fetch
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PoemSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<PoemRecord>> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const POPE: &str = r#"[{
        "title": "Epitaph. on Sir William Trumbull.",
        "author": "Alexander Pope",
        "lines": [
            "A pleasing form; a firm, yet cautious mind;",
            "Sincere, though prudent; constant, yet resign'd:"
        ]
    }]"#;

    #[test]
    fn test_default_query_url() {
        assert_eq!(
            PoemQuery::default().url(),
            "https://poetrydb.org/random,linecount/1;12/author,title,lines.json"
        );
    }

    #[test]
    fn test_query_without_line_count() {
        let query = PoemQuery {
            base_url: "http://localhost:8000/".to_string(),
            count: 3,
            line_count: None,
        };
        assert_eq!(
            query.url(),
            "http://localhost:8000/random/3/author,title,lines.json"
        );
    }

    #[test]
    fn test_parse_poem_list() {
        let poems = parse_response(POPE).unwrap();
        assert_eq!(poems.len(), 1);
        assert_eq!(poems[0].author, "Alexander Pope");
        assert_eq!(poems[0].lines.len(), 2);
    }

    #[test]
    fn test_parse_status_object() {
        let err = parse_response(r#"{"status":404,"reason":"Not found"}"#).unwrap_err();
        match err {
            Error::Api { status, reason } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not found");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_as_string() {
        let err = parse_response(r#"{"status":"405","reason":"list not available"}"#).unwrap_err();
        assert!(matches!(err, Error::Api { status: 405, .. }));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_response("not json"), Err(Error::Json(_))));
        assert!(matches!(parse_response(r#"{"foo": 1}"#), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_http_source_fetches_poems() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/random,linecount/1;12/author,title,lines.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(POPE);
            })
            .await;

        let config = SourceConfig {
            base_url: server.base_url(),
            ..SourceConfig::default()
        };
        let source = HttpSource::from_config(&config).unwrap();
        let poems = source.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(poems[0].title, "Epitaph. on Sir William Trumbull.");
    }

    #[tokio::test]
    async fn test_http_source_reports_api_miss() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200)
                    .body(r#"{"status":404,"reason":"Not found"}"#);
            })
            .await;

        let config = SourceConfig {
            base_url: server.base_url(),
            line_count: Some(9999),
            ..SourceConfig::default()
        };
        let source = HttpSource::from_config(&config).unwrap();
        let result = source.fetch().await;
        assert!(matches!(result, Err(Error::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_http_source_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(503).body("<html>down</html>");
            })
            .await;

        let config = SourceConfig {
            base_url: server.base_url(),
            ..SourceConfig::default()
        };
        let source = HttpSource::from_config(&config).unwrap();
        let result = source.fetch().await;
        assert!(matches!(result, Err(Error::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poem.json");
        std::fs::write(&path, POPE).unwrap();

        let poems = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(poems[0].author, "Alexander Pope");

        let missing = FileSource::new(dir.path().join("nope.json")).fetch().await;
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
