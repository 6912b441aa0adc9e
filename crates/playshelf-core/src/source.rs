use std::future::Future;
use std::path::PathBuf;

use url::Url;

use crate::error::CatalogError;
use crate::game::GameRecord;

/// Somewhere a catalog document can be fetched from.
pub trait CatalogSource {
    /// Human-readable location, used in log output.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Vec<GameRecord>, CatalogError>> + Send;
}

/// Parse a catalog document: a JSON array of game objects.
pub fn parse_catalog(json: &str) -> Result<Vec<GameRecord>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Catalog stored in a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<GameRecord>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_catalog(&content)
    }
}

/// Catalog served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: Url) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("playshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { url, client })
    }
}

impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<GameRecord>, CatalogError> {
        let resp = self.client.get(self.url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(CatalogError::HttpStatus(resp.status().as_u16()));
        }
        let body = resp.text().await?;
        parse_catalog(&body)
    }
}

/// Records already in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    records: Vec<GameRecord>,
}

impl InlineSource {
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self { records }
    }
}

impl CatalogSource for InlineSource {
    fn describe(&self) -> String {
        format!("inline ({} games)", self.records.len())
    }

    async fn fetch(&self) -> Result<Vec<GameRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// A file or HTTP source chosen from a configured location string.
#[derive(Debug, Clone)]
pub enum CatalogLocation {
    File(FileSource),
    Http(HttpSource),
}

impl CatalogLocation {
    /// `http://` and `https://` locations are fetched over the network,
    /// anything else is treated as a file path.
    pub fn parse(location: &str) -> Result<Self, CatalogError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location)
                .map_err(|e| CatalogError::config(format!("invalid catalog URL {location}: {e}")))?;
            return Ok(Self::Http(HttpSource::new(url)?));
        }
        Ok(Self::File(FileSource::new(location)))
    }
}

impl CatalogSource for CatalogLocation {
    fn describe(&self) -> String {
        match self {
            Self::File(s) => s.describe(),
            Self::Http(s) => s.describe(),
        }
    }

    async fn fetch(&self) -> Result<Vec<GameRecord>, CatalogError> {
        match self {
            Self::File(s) => s.fetch().await,
            Self::Http(s) => s.fetch().await,
        }
    }
}
