//! Article synthesis from extracted page content
//!
//! The output file is a single shared path. Concurrent requests race on it
//! and the last completed write wins; nothing here serializes writers.

use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::{HandlerError, require_non_empty};
use super::types::ArticleArtifact;
use crate::providers::{GenerationConfig, GenerationProvider, GenerationRequest, SearchProvider};

const TEMPERATURE: f32 = 0.8;

/// Extracts a page, synthesizes a short article and writes it to disk
pub struct ArticleHandler {
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn GenerationProvider>,
    output_path: PathBuf,
}

impl ArticleHandler {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn GenerationProvider>,
        output_path: PathBuf,
    ) -> Self {
        Self {
            search,
            generator,
            output_path,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn handle(&self, url: &str) -> Result<ArticleArtifact, HandlerError> {
        require_non_empty(url, "URL is required")?;

        let pages = self.search.extract(url).await?;
        let page = pages.into_iter().next().ok_or_else(|| {
            warn!(url, provider = self.search.name(), "Extraction returned no results");
            HandlerError::NotFound(format!("no content extracted from {}", url))
        })?;
        debug!(url, chars = page.raw_content.len(), "Page extracted");

        let request = GenerationRequest::prompt(
            build_article_prompt(&page.raw_content, Local::now().date_naive()),
            GenerationConfig::default().with_temperature(TEMPERATURE),
        );

        let article = self.generator.generate(request).await?;
        if article.trim().is_empty() {
            return Err(HandlerError::GenerationFailed(
                "no article generated".to_string(),
            ));
        }

        let bytes_written = write_verified(&self.output_path, &article).await?;
        info!(
            url,
            path = %self.output_path.display(),
            bytes = bytes_written,
            "Article saved"
        );

        Ok(ArticleArtifact {
            path: self.output_path.clone(),
            bytes_written,
        })
    }
}

pub fn build_article_prompt(content: &str, today: NaiveDate) -> String {
    format!(
        "You are a Journalist Agent. You are tasked to write a short and engaging blog post \
         only based on the content provided: The content is : {content}, Today's date is {}",
        today.format("%Y-%m-%d")
    )
}

/// Write `text` and confirm the file holds exactly that many bytes
async fn write_verified(path: &Path, text: &str) -> Result<u64, HandlerError> {
    let persistence = |source| HandlerError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    tokio::fs::write(path, text).await.map_err(persistence)?;

    let written = tokio::fs::metadata(path).await.map_err(persistence)?.len();
    let expected = text.len() as u64;
    if written != expected {
        return Err(persistence(std::io::Error::other(format!(
            "short write: expected {} bytes, found {}",
            expected, written
        ))));
    }

    Ok(written)
}
