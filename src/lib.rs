mod config;
mod downloader;
mod engine;
mod error;
mod quotes;
mod spider;
mod stats;

pub mod document;
pub mod extractor;
pub mod sink;
pub mod util;

// (Re) Exports
pub use config::Config;
pub use downloader::{Downloader, DownloaderError, Response};
pub use engine::Engine;
pub use error::{Error, Result};
pub use extractor::{PageExtractor, QuoteRecord, QuoteSelectors};
pub use quotes::{QuotesSpider, DEFAULT_START_URL};
pub use sink::{ItemSink, JsonLinesSink};
pub use spider::{Output, Spider};
pub use stats::Stats;

pub fn engine<S>(spider: S) -> Engine<S>
where
    S: Spider + Send + Sync,
{
    Engine::new(Config::default(), spider)
}

pub fn engine_with_config<S>(config: Config, spider: S) -> Engine<S>
where
    S: Spider + Send + Sync,
{
    Engine::new(config, spider)
}
