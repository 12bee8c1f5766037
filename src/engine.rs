use std::collections::{HashSet, VecDeque};

use tokio::sync::broadcast;

use crate::Config;
use crate::downloader::{Downloader, DownloaderError, Response};
use crate::error::{Error, Result};
use crate::sink::ItemSink;
use crate::spider::Spider;
use crate::stats::Stats;
use crate::util;

/// Sequential crawl loop around a single spider.
///
/// Pages are fetched one at a time. Every url is fetched at most once per
/// run, so a "next" chain that loops back on itself still terminates.
pub struct Engine<S>
where
    S: Spider + Send + Sync,
{
    config: Config,
    spider: S,
    downloader: Downloader,
    stats: Stats,
    stop_tx: broadcast::Sender<()>,
    stop_rx: broadcast::Receiver<()>,
}

impl<S> Engine<S>
where
    S: Spider + Send + Sync,
{
    pub fn new(config: Config, spider: S) -> Self {
        let (stop_tx, stop_rx) = broadcast::channel::<()>(32);
        Self {
            downloader: Downloader::new(&config),
            config,
            spider,
            stats: Stats::new(),
            stop_tx,
            stop_rx,
        }
    }

    /// Sending on the returned channel stops the crawl before the next page.
    pub fn stop_sender(&self) -> broadcast::Sender<()> {
        self.stop_tx.clone()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub async fn start<K>(&mut self, sink: &mut K) -> Result<()>
    where
        K: ItemSink<S::Item>,
    {
        self.config.sanity_check()?;
        self.stats = Stats::new();

        let mut queue = VecDeque::new();
        // Urls ever enqueued
        let mut seen = HashSet::new();
        // Urls actually fetched, request and redirect target alike
        let mut crawled = HashSet::new();
        for start_url in self.spider.start_urls() {
            let url = util::parse_url(&start_url)?.to_string();
            if seen.insert(url.clone()) {
                queue.push_back(url);
            }
        }

        'run: while let Some(url) = queue.pop_front() {
            if crawled.contains(&url) {
                log::debug!("Already crawled {}", url);
                continue;
            }
            if self.config.max_pages > 0
                && self.stats.total_crawled() >= self.config.max_pages as u64
            {
                log::info!("Reached {} pages, stopping", self.config.max_pages);
                break 'run;
            }

            log::info!("[{}] {}", self.spider.name(), &url);

            let response = tokio::select! {
                _ = self.stop_rx.recv() => {
                    log::info!("Stop requested");
                    break 'run;
                }
                res = fetch(self.downloader.clone(), url.clone()) => res,
            };
            crawled.insert(url.clone());
            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    // No retry, the page is dropped
                    log::error!("[{}] {}", self.spider.name(), e);
                    self.stats.incr_total_failed();
                    continue;
                }
            };

            let page_url = response.url.clone();
            if page_url != url && !crawled.insert(page_url.clone()) {
                log::debug!("{} redirected to already crawled {}", url, page_url);
                continue;
            }
            seen.insert(page_url.clone());
            self.stats.incr_total_crawled();

            let output = match self.spider.parse(response).await {
                Ok(output) => output,
                Err(e) => {
                    log::error!("[{}] {}", self.spider.name(), e);
                    self.stats.incr_total_failed();
                    continue;
                }
            };

            self.stats.add_total_scraped(output.items.len() as u64);
            for item in &output.items {
                sink.write_item(item)?;
            }

            let base_url = util::parse_url(&page_url)?;
            for request in output.requests {
                match util::normalize_url(&base_url, &request) {
                    Some(next) => {
                        let next = next.to_string();
                        if seen.insert(next.clone()) {
                            queue.push_back(next);
                        } else {
                            log::debug!("Already visited {}", next);
                        }
                    }
                    None => log::debug!("Skipping {}", request),
                }
            }
        }

        sink.flush()?;
        self.stats.report();
        log::info!("Exit gracefully");
        Ok(())
    }
}

/// Run a blocking download off the executor.
async fn fetch(downloader: Downloader, url: String) -> Result<Response> {
    let fetch_url = url.clone();
    match tokio::task::spawn_blocking(move || downloader.get(&fetch_url)).await {
        Ok(res) => res.map_err(Error::from),
        Err(_) => Err(DownloaderError::Killed { url }.into()),
    }
}
