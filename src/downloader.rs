use std::time::Duration;

use thiserror::Error;

use crate::Config;

#[derive(Debug, Error)]
pub enum DownloaderError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("download of {url} was cancelled")]
    Killed { url: String },
}

/// A fetched page, detached from the connection it came from.
#[derive(Clone, Debug)]
pub struct Response {
    /// Final url, after redirects
    pub url: String,
    /// Empty when the server sent no Content-Type header
    pub content_type: String,
    pub body: String,
}

impl Response {
    pub fn new(url: &str, content_type: &str, body: &str) -> Self {
        Self {
            url: url.to_owned(),
            content_type: content_type.to_owned(),
            body: body.to_owned(),
        }
    }

    /// A missing content type is taken as HTML.
    pub fn is_html(&self) -> bool {
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml"
    }
}

#[derive(Clone)]
pub struct Downloader {
    agent: ureq::Agent,
}

impl Downloader {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.bot_name)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self { agent }
    }

    /// Blocking GET. Call it off the async executor.
    pub fn get(&self, url: &str) -> Result<Response, DownloaderError> {
        let response = self.agent.get(url).call().map_err(|e| {
            log::error!("{}", e);
            DownloaderError::Request {
                url: url.to_owned(),
                source: Box::new(e),
            }
        })?;

        let final_url = response.get_url().to_owned();
        // ureq reports text/plain when the header is missing
        let content_type = match response.header("content-type") {
            Some(_) => response.content_type().to_owned(),
            None => String::new(),
        };
        let body = response.into_string().map_err(|source| DownloaderError::Body {
            url: final_url.clone(),
            source,
        })?;

        Ok(Response {
            url: final_url,
            content_type,
            body,
        })
    }
}
