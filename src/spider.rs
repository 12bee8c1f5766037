use async_trait::async_trait;
use serde::Serialize;

use crate::Response;
use crate::error::Result;

/// What a spider produced from one page.
#[derive(Debug, PartialEq)]
pub struct Output<T> {
    /// Scraped items, in page order
    pub items: Vec<T>,
    /// Candidate urls to crawl next, possibly relative to the page url
    pub requests: Vec<String>,
}

impl<T> Default for Output<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            requests: vec![],
        }
    }
}

/// Spider interface
#[async_trait]
pub trait Spider {
    type Item: Serialize + Send;

    /// Get spider name.
    fn name(&self) -> String;

    /// Returns a list of starting urls.
    fn start_urls(&self) -> Vec<String>;

    /// Parse response
    ///
    /// An `Err` means the page itself could not be processed; the engine
    /// logs it and carries on with the remaining urls.
    async fn parse(&self, response: Response) -> Result<Output<Self::Item>>;
}
