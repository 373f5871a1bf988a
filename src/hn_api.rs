use anyhow::Context;

pub(crate) type StoryId = i64;

/// Raw item as served by `item/{id}.json`. Only the fields we project are kept.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub(crate) struct StoryRecord {
    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
}

#[derive(Debug)]
pub(crate) struct HnClient {
    client: reqwest::Client,
    base_url: String,
}

impl HnClient {
    pub(crate) fn new(base_url: &str, timeout: std::time::Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) async fn fetch_top_ids(&self) -> anyhow::Result<Vec<StoryId>> {
        let url = format!("{}/topstories.json", self.base_url);
        self.get_json(&url).await
    }

    /// The API answers `null` for ids it does not know. That is returned as an empty record.
    pub(crate) async fn fetch_story(&self, id: StoryId) -> anyhow::Result<StoryRecord> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        let story: Option<StoryRecord> = self.get_json(&url).await?;
        Ok(story.unwrap_or_default())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Request to {url} failed"))?;

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        serde_json::from_slice(&body).with_context(|| format!("Malformed response from {url}"))
    }
}
