use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Where scraped items end up.
pub trait ItemSink<T> {
    fn write_item(&mut self, item: &T) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes each item as one line of JSON.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    num_written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            num_written: 0,
        }
    }

    pub fn num_written(&self) -> u64 {
        self.num_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T: Serialize, W: Write> ItemSink<T> for JsonLinesSink<W> {
    fn write_item(&mut self, item: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, item)?;
        self.writer.write_all(b"\n")?;
        self.num_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<T: Clone> ItemSink<T> for Vec<T> {
    fn write_item(&mut self, item: &T) -> Result<()> {
        self.push(item.clone());
        Ok(())
    }
}
