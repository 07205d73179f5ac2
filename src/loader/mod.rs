//! The fetch → write → load → report cycle behind each trigger endpoint.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::LoadConfig;
use crate::csvfile;
use crate::database::Database;
use crate::errors::{CsvFileError, LoadError};
use crate::fetcher::SpeakerFetcher;
use crate::models::{LoadReport, LoadStrategy, SpeakerRecord};

pub mod accumulator;

use accumulator::{InsertAccumulator, InsertSink};

/// Shared first stage of both strategies: pull everything from the speakers
/// service and spill it to the interchange file. A fetch failure leaves the
/// filesystem untouched and skips the load entirely.
pub async fn fetch_to_csv(
    fetcher: &SpeakerFetcher,
    csv_path: &Path,
) -> Result<Vec<SpeakerRecord>, LoadError> {
    let records = fetcher.fetch_all().await?;
    info!("fetched {} speaker records", records.len());

    csvfile::write_records(csv_path, &records).map_err(LoadError::CsvFile)?;
    Ok(records)
}

pub struct LoadService {
    database: Database,
    fetcher: SpeakerFetcher,
    csv_path: PathBuf,
    batch_size: usize,
}

impl LoadService {
    pub fn new(database: Database, fetcher: SpeakerFetcher, config: &LoadConfig) -> Self {
        Self {
            database,
            fetcher,
            csv_path: config.csv_path.clone(),
            batch_size: config.batch_size,
        }
    }

    /// Run one full demo cycle for the given strategy and report how many
    /// rows landed and how long the load stage took. The table is emptied
    /// again after counting; the dataset never persists between runs.
    pub async fn run(&self, strategy: LoadStrategy) -> Result<LoadReport, LoadError> {
        fetch_to_csv(&self.fetcher, &self.csv_path).await?;

        let start = Instant::now();
        match strategy {
            LoadStrategy::CopyFrom => self.load_with_copy().await?,
            LoadStrategy::BatchedInsert => self.load_with_batched_insert().await?,
        }
        let elapsed = start.elapsed();

        let rows_created = self.database.count_speakers().await?;
        let cleared = self.database.clear_speakers().await?;
        debug!("cleared {} rows after counting", cleared);

        info!(
            "{} load finished: {} rows in {:?}",
            strategy.describe(),
            rows_created,
            elapsed
        );

        Ok(LoadReport {
            strategy,
            rows_created,
            elapsed,
        })
    }

    async fn load_with_copy(&self) -> Result<(), LoadError> {
        let csv_data = tokio::fs::read(&self.csv_path)
            .await
            .map_err(CsvFileError::from)?;
        self.database.copy_speakers(&csv_data).await?;
        Ok(())
    }

    async fn load_with_batched_insert(&self) -> Result<(), LoadError> {
        let records = csvfile::read_records(&self.csv_path)?;

        let sink = SpeakerInsertSink {
            database: self.database.clone(),
        };
        let mut accumulator = InsertAccumulator::new(sink, self.batch_size);
        for record in records {
            accumulator.add(record).await?;
        }
        let flushed = accumulator.finish().await?;
        debug!("batched insert flushed {} rows", flushed);
        Ok(())
    }
}

struct SpeakerInsertSink {
    database: Database,
}

#[async_trait]
impl InsertSink<SpeakerRecord> for SpeakerInsertSink {
    async fn insert_batch(&mut self, rows: Vec<SpeakerRecord>) -> Result<(), sqlx::Error> {
        self.database.insert_speakers(&rows).await
    }
}
