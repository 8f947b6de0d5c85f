use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

const SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d/";

/// Where the verses live. The column layout is a decoding concern and is
/// handed to the session separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    pub sheet_id: String,
    pub sheet_name: String,
}

impl SheetSource {
    pub fn new(sheet_id: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// CSV export endpoint of the named sheet.
    pub fn csv_url(&self) -> Result<Url> {
        let sheet_id = self.sheet_id.trim();
        ensure!(
            !sheet_id.is_empty() && !sheet_id.contains(['/', '?', '#']),
            "invalid sheet id '{}'",
            self.sheet_id
        );
        let mut url = Url::parse(SHEETS_BASE_URL)?
            .join(&format!("{sheet_id}/gviz/tq"))
            .with_context(|| format!("invalid sheet id '{}'", self.sheet_id))?;
        url.query_pairs_mut()
            .append_pair("tqx", "out:csv")
            .append_pair("sheet", &self.sheet_name);
        Ok(url)
    }
}

#[async_trait]
pub trait VerseSource: Send + Sync {
    async fn fetch_csv(&self) -> Result<String>;
}

pub struct HttpVerseSource {
    http: Client,
    url: Url,
}

impl HttpVerseSource {
    pub fn new(url: Url) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }

    pub fn for_sheet(sheet: &SheetSource) -> Result<Self> {
        Ok(Self::new(sheet.csv_url()?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl VerseSource for HttpVerseSource {
    async fn fetch_csv(&self) -> Result<String> {
        let body = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.url))?
            .error_for_status()
            .context("verse sheet answered with a non-success status")?
            .text()
            .await
            .context("failed to read verse sheet body")?;
        Ok(body)
    }
}
