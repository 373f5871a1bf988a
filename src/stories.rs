use crate::hn_api::{HnClient, StoryRecord};

pub(crate) const MAX_STORIES: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct OutputRecord {
    pub(crate) title: String,
    pub(crate) link: Option<String>,
}

impl std::fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}",
            escape_control(&self.title),
            escape_control(self.link.as_deref().unwrap_or("-"))
        )
    }
}

/// Keeps a record on a single line: tabs and line breaks are written as `\t`, `\n`, `\r`.
fn escape_control(s: &str) -> std::borrow::Cow<'_, str> {
    if !s.contains(['\t', '\n', '\r']) {
        return std::borrow::Cow::Borrowed(s);
    }
    std::borrow::Cow::Owned(
        s.replace('\t', "\\t")
            .replace('\n', "\\n")
            .replace('\r', "\\r"),
    )
}

/// Stories without a title (or with an empty one) are dropped. An empty url counts as no link.
pub(crate) fn project(story: StoryRecord) -> Option<OutputRecord> {
    let title = story.title.filter(|t| !t.is_empty())?;
    Some(OutputRecord {
        title,
        link: story.url.filter(|u| !u.is_empty()),
    })
}

/// Out of range counts are silently pulled into `1..=MAX_STORIES`.
pub(crate) fn clamp_count(num: i64) -> usize {
    num.clamp(1, MAX_STORIES as i64) as usize
}

/// Walks the top stories in rank order until `max_items` titled stories are collected or
/// the ids run out. Every accepted story is handed to `on_record` and followed by `delay`.
/// Skipped stories are not delayed. The first failed request aborts the whole pass.
pub(crate) async fn collect(
    client: &HnClient,
    max_items: usize,
    delay: std::time::Duration,
    mut on_record: impl FnMut(&OutputRecord) -> anyhow::Result<()>,
) -> anyhow::Result<Vec<OutputRecord>> {
    let ids = client.fetch_top_ids().await?;
    tracing::info!(num_ids = ids.len(), "Got top story ids");

    let mut records = Vec::with_capacity(max_items.min(ids.len()));

    for id in ids {
        if records.len() >= max_items {
            break;
        }

        let story = client.fetch_story(id).await?;

        let Some(record) = project(story) else {
            tracing::info!(id, "Skipped story without title");
            continue;
        };

        tracing::info!(id, title = record.title, link =? record.link, "Got story");
        on_record(&record)?;
        records.push(record);

        tokio::time::sleep(delay).await;
    }

    tracing::info!(num_records = records.len(), "Finished collecting stories");

    Ok(records)
}
