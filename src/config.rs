use crate::error::{Error, Result};

pub struct Config {
    /// Bot name / user agent
    pub bot_name: String,
    /// Stop after this many pages have been crawled. A value of 0 means that
    /// this setting will be ignored.
    pub max_pages: u32,
    /// Timeout (in secs) for a single page download, connect and read
    /// included.
    pub timeout_secs: u64,
}

impl Config {
    pub fn sanity_check(&self) -> Result<()> {
        if self.bot_name.trim().is_empty() {
            return Err(Error::Config("config.bot_name cannot be empty".to_owned()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("config.timeout_secs cannot be zero".to_owned()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_name: "quotescrapebot".to_owned(),
            max_pages: 0,
            timeout_secs: 30,
        }
    }
}
