//! Buffer-and-flush helper for the batched-insert strategy.
//!
//! Rows queue up per target entity type — the type parameter — and each full
//! batch of `threshold` rows goes to the sink as one bulk insert, amortizing
//! per-statement overhead while capping buffer growth at the threshold.

use async_trait::async_trait;
use tracing::warn;

/// Storage seam for one entity type's bulk inserts.
#[async_trait]
pub trait InsertSink<T: Send>: Send {
    async fn insert_batch(&mut self, rows: Vec<T>) -> Result<(), sqlx::Error>;
}

pub struct InsertAccumulator<T, S> {
    sink: S,
    buffer: Vec<T>,
    threshold: usize,
    flushed: u64,
}

impl<T: Send, S: InsertSink<T>> InsertAccumulator<T, S> {
    pub fn new(sink: S, threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            sink,
            buffer: Vec::with_capacity(threshold),
            threshold,
            flushed: 0,
        }
    }

    /// Queue one row; flushes the whole buffer to the sink the moment it
    /// reaches the threshold. Sink failures propagate.
    pub async fn add(&mut self, row: T) -> Result<(), sqlx::Error> {
        self.buffer.push(row);
        if self.buffer.len() >= self.threshold {
            self.flush().await?;
        }
        Ok(())
    }

    /// Flush the final partial batch and return the total number of rows
    /// flushed over the accumulator's lifetime.
    ///
    /// Callers MUST finish an accumulator they are done adding to; dropping
    /// one instead abandons up to `threshold - 1` buffered rows.
    pub async fn finish(mut self) -> Result<u64, sqlx::Error> {
        if !self.buffer.is_empty() {
            self.flush().await?;
        }
        Ok(self.flushed)
    }

    async fn flush(&mut self) -> Result<(), sqlx::Error> {
        let batch = std::mem::take(&mut self.buffer);
        let rows = batch.len() as u64;
        self.sink.insert_batch(batch).await?;
        self.flushed += rows;
        Ok(())
    }
}

impl<T, S> Drop for InsertAccumulator<T, S> {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            warn!(
                "insert accumulator dropped with {} unflushed rows; finish() was not called",
                self.buffer.len()
            );
        }
    }
}
