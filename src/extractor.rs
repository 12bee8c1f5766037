//! Quote extraction and pagination for one page.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::document::{Document, Element, Pattern};
use crate::error::Result;
use crate::util;

/// One scraped quote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub text: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

/// Selector strings used by [`PageExtractor`].
///
/// Defaults match the markup of quotes.toscrape.com.
#[derive(Clone, Debug)]
pub struct QuoteSelectors {
    /// Container of a single quote
    pub quote: String,
    /// Quote text, relative to the container
    pub text: String,
    /// Author name, relative to the container
    pub author: String,
    /// Tag links, relative to the container
    pub tag: String,
    /// The "next page" link
    pub next_page: String,
    /// Attribute of the "next page" link holding its target
    pub next_page_attr: String,
}

impl Default for QuoteSelectors {
    fn default() -> Self {
        Self {
            quote: "div.quote".to_owned(),
            text: "span.text".to_owned(),
            author: "small.author".to_owned(),
            tag: "div.tags a.tag".to_owned(),
            next_page: "li.next a".to_owned(),
            next_page_attr: "href".to_owned(),
        }
    }
}

pub struct PageExtractor {
    quote: Pattern,
    text: Pattern,
    author: Pattern,
    tag: Pattern,
    next_page: Pattern,
    next_page_attr: String,
}

impl PageExtractor {
    pub fn new(selectors: &QuoteSelectors) -> Result<Self> {
        Ok(Self {
            quote: Pattern::parse(&selectors.quote)?,
            text: Pattern::parse(&selectors.text)?,
            author: Pattern::parse(&selectors.author)?,
            tag: Pattern::parse(&selectors.tag)?,
            next_page: Pattern::parse(&selectors.next_page)?,
            next_page_attr: selectors.next_page_attr.clone(),
        })
    }

    /// Lazily extract one record per quote block, in document order.
    pub fn extract_items<'p, 'a, D: Document>(
        &'p self,
        doc: &'a D,
    ) -> Items<'p, D::Element<'a>> {
        Items {
            extractor: self,
            blocks: doc.select(&self.quote).into_iter(),
        }
    }

    /// Absolute url of the next page, or `None` when pagination ends here.
    ///
    /// A next link without its target attribute also ends pagination.
    pub fn find_next_page<D: Document>(&self, doc: &D, base_url: &Url) -> Result<Option<Url>> {
        let href = doc
            .select(&self.next_page)
            .first()
            .and_then(|link| link.attr(&self.next_page_attr));
        match href {
            Some(href) => util::join_url(base_url, href).map(Some),
            None => Ok(None),
        }
    }

    pub fn extract<D: Document>(
        &self,
        doc: &D,
        base_url: &Url,
    ) -> Result<(Vec<QuoteRecord>, Option<Url>)> {
        let records = self.extract_items(doc).collect();
        let next_page = self.find_next_page(doc, base_url)?;
        Ok((records, next_page))
    }

    fn record<'a, E: Element<'a>>(&self, block: E) -> QuoteRecord {
        QuoteRecord {
            text: first_text(block, &self.text),
            author: first_text(block, &self.author),
            tags: block
                .select(&self.tag)
                .iter()
                .flat_map(|tag| tag.own_text())
                .collect(),
        }
    }
}

/// First own text node across all matches of `pattern`.
fn first_text<'a, E: Element<'a>>(scope: E, pattern: &Pattern) -> Option<String> {
    scope
        .select(pattern)
        .iter()
        .flat_map(|el| el.own_text())
        .next()
}

/// Iterator returned by [`PageExtractor::extract_items`].
pub struct Items<'p, E> {
    extractor: &'p PageExtractor,
    blocks: std::vec::IntoIter<E>,
}

impl<'p, 'a, E: Element<'a>> Iterator for Items<'p, E> {
    type Item = QuoteRecord;

    fn next(&mut self) -> Option<QuoteRecord> {
        self.blocks.next().map(|block| self.extractor.record(block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.blocks.size_hint()
    }
}
