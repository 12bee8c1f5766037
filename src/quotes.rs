use async_trait::async_trait;

use crate::document::HtmlDocument;
use crate::error::Result;
use crate::extractor::{PageExtractor, QuoteRecord, QuoteSelectors};
use crate::spider::{Output, Spider};
use crate::{util, Response};

pub const DEFAULT_START_URL: &str = "https://quotes.toscrape.com/page/1";

/// Follows the "next" links of a paginated quote listing.
pub struct QuotesSpider {
    start_url: String,
    extractor: PageExtractor,
}

impl QuotesSpider {
    pub fn new() -> Result<Self> {
        Self::with_start_url(DEFAULT_START_URL)
    }

    pub fn with_start_url(start_url: &str) -> Result<Self> {
        Self::with_selectors(start_url, &QuoteSelectors::default())
    }

    pub fn with_selectors(start_url: &str, selectors: &QuoteSelectors) -> Result<Self> {
        // Fail on a bad seed now rather than on the first fetch
        util::parse_url(start_url)?;
        Ok(Self {
            start_url: start_url.to_owned(),
            extractor: PageExtractor::new(selectors)?,
        })
    }
}

#[async_trait]
impl Spider for QuotesSpider {
    type Item = QuoteRecord;

    fn name(&self) -> String {
        "toscrape-css".to_owned()
    }

    fn start_urls(&self) -> Vec<String> {
        vec![self.start_url.clone()]
    }

    async fn parse(&self, response: Response) -> Result<Output<QuoteRecord>> {
        let base_url = util::parse_url(&response.url)?;
        let (items, next_page) = {
            let document = HtmlDocument::from_response(&response)?;
            self.extractor.extract(&document, &base_url)?
        };
        log::debug!(
            "{}: {} quotes, next page {:?}",
            response.url,
            items.len(),
            next_page.as_ref().map(|u| u.as_str()),
        );

        Ok(Output {
            items,
            requests: next_page.into_iter().map(|u| u.to_string()).collect(),
        })
    }
}
