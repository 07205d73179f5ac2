use sqlx::QueryBuilder;
use tracing::debug;

use super::Database;
use crate::csvfile::COLUMNS;
use crate::models::SpeakerRecord;

impl Database {
    /// Insert a batch of speakers with one multi-row INSERT.
    ///
    /// Six binds per row keeps a 10,000-row batch under PostgreSQL's 65,535
    /// bind-parameter limit.
    pub async fn insert_speakers(&self, rows: &[SpeakerRecord]) -> Result<(), sqlx::Error> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut query_builder = QueryBuilder::new(
            "INSERT INTO speakers (first_name, last_name, title, company, speaker_bio, speaker_photo) ",
        );

        query_builder.push_values(rows, |mut b, row| {
            b.push_bind(&row.first_name)
                .push_bind(&row.last_name)
                .push_bind(&row.title)
                .push_bind(&row.company)
                .push_bind(&row.speaker_bio)
                .push_bind(row.speaker_photo.as_deref());
        });

        query_builder.build().execute(&self.pool).await?;
        Ok(())
    }

    /// Stream a CSV payload straight into the speakers table with COPY,
    /// bypassing per-row statement overhead.
    pub async fn copy_speakers(&self, csv_data: &[u8]) -> Result<u64, sqlx::Error> {
        let statement = format!(
            "COPY speakers ({}) FROM STDIN WITH (FORMAT csv)",
            COLUMNS.join(", ")
        );

        let mut tx = self.pool.begin().await?;
        let mut copy = tx.copy_in_raw(&statement).await?;
        copy.send(csv_data).await?;
        let rows = copy.finish().await?;
        tx.commit().await?;

        debug!("COPY loaded {} rows", rows);
        Ok(rows)
    }

    pub async fn count_speakers(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM speakers")
            .fetch_one(&self.pool)
            .await
    }

    /// The demo dataset is transient; every run ends by emptying the table.
    pub async fn clear_speakers(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM speakers")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
