use std::io;

use quotescrape::{Config, JsonLinesSink, QuotesSpider, DEFAULT_START_URL};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional seed url as the first argument
    let start_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_START_URL.to_owned());
    let spider = QuotesSpider::with_start_url(&start_url)?;

    let mut engine = quotescrape::engine_with_config(Config::default(), spider);
    let stop_tx = engine.stop_sender();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    let stdout = io::stdout();
    let mut sink = JsonLinesSink::new(stdout.lock());
    engine.start(&mut sink).await?;

    eprintln!("{} quotes written", sink.num_written());
    Ok(())
}
