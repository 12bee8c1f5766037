//! Query surface over a parsed page.
//!
//! Extraction code only talks to [`Document`] and [`Element`]: select the
//! elements matching a [`Pattern`], then read their own text nodes or an
//! attribute.
//! Neither operation fails when nothing matches; absence is `None` or an
//! empty `Vec`.

use scraper::{ElementRef, Html, Selector};

use crate::downloader::Response;
use crate::error::{Error, Result};

/// A compiled structural pattern (CSS selector syntax).
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    selector: Selector,
}

impl Pattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let selector = Selector::parse(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: format!("{:?}", e),
        })?;
        Ok(Self {
            source: pattern.to_owned(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

pub trait Document {
    type Element<'a>: Element<'a>
    where
        Self: 'a;

    /// All elements matching `pattern`, in document order.
    fn select<'a>(&'a self, pattern: &Pattern) -> Vec<Self::Element<'a>>;
}

pub trait Element<'a>: Copy + Sized {
    /// Descendants of this element matching `pattern`, in document order.
    fn select(&self, pattern: &Pattern) -> Vec<Self>;

    /// The element's own text nodes, in order. Text inside child elements
    /// is not included.
    fn own_text(&self) -> Vec<String>;

    fn attr(&self, name: &str) -> Option<&'a str>;
}

/// An HTML page parsed with `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Parse a downloaded page, refusing anything that isn't HTML.
    pub fn from_response(response: &Response) -> Result<Self> {
        if !response.is_html() {
            return Err(Error::DocumentUnreadable {
                url: response.url.clone(),
                reason: format!("unexpected content type `{}`", response.content_type),
            });
        }
        Ok(Self::parse(&response.body))
    }
}

/// An element of an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl Document for HtmlDocument {
    type Element<'a> = HtmlElement<'a>;

    fn select<'a>(&'a self, pattern: &Pattern) -> Vec<HtmlElement<'a>> {
        self.html.select(&pattern.selector).map(HtmlElement).collect()
    }
}

impl<'a> Element<'a> for HtmlElement<'a> {
    fn select(&self, pattern: &Pattern) -> Vec<Self> {
        self.0.select(&pattern.selector).map(HtmlElement).collect()
    }

    fn own_text(&self) -> Vec<String> {
        self.0
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| String::from(&**text))
            .collect()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }
}
