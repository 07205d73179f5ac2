use serde::Deserialize;
use std::time::Duration;

/// Response body of `GET /conference/speakers`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerPage {
    pub count: u64,
    pub results: Vec<SpeakerPayload>,
}

/// One speaker as the remote service serializes it. The photo travels as a
/// nullable string whose bytes are the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerPayload {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub company: String,
    pub speaker_bio: String,
    pub speaker_photo: Option<String>,
}

/// A speaker record as it moves between the fetcher, the CSV file, and the
/// loaders. `speaker_id` is assigned by the database and never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerRecord {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub company: String,
    pub speaker_bio: String,
    pub speaker_photo: Option<Vec<u8>>,
}

impl From<SpeakerPayload> for SpeakerRecord {
    fn from(payload: SpeakerPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            title: payload.title,
            company: payload.company,
            speaker_bio: payload.speaker_bio,
            speaker_photo: payload.speaker_photo.map(String::into_bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    CopyFrom,
    BatchedInsert,
}

impl LoadStrategy {
    pub fn describe(&self) -> &'static str {
        match self {
            LoadStrategy::CopyFrom => "PostgreSQL COPY FROM",
            LoadStrategy::BatchedInsert => "batched INSERT",
        }
    }
}

/// Outcome of one load run, rendered on the results page.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub strategy: LoadStrategy,
    pub rows_created: i64,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn summary(&self) -> String {
        format!(
            "Created {} rows in {:.3} milliseconds using {}",
            self.rows_created,
            self.elapsed.as_secs_f64() * 1000.0,
            self.strategy.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_conversion_keeps_photo_bytes() {
        let payload = SpeakerPayload {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            title: "Engineer".to_string(),
            company: "Analytical Engines".to_string(),
            speaker_bio: "First programmer".to_string(),
            speaker_photo: Some("\u{1f4f7}".to_string()),
        };

        let record = SpeakerRecord::from(payload);
        assert_eq!(
            record.speaker_photo.as_deref(),
            Some("\u{1f4f7}".as_bytes())
        );
    }

    #[test]
    fn payload_conversion_keeps_missing_photo() {
        let payload = SpeakerPayload {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            title: "Rear Admiral".to_string(),
            company: "US Navy".to_string(),
            speaker_bio: "COBOL".to_string(),
            speaker_photo: None,
        };

        assert_eq!(SpeakerRecord::from(payload).speaker_photo, None);
    }

    #[test]
    fn summary_names_strategy_and_counts() {
        let report = LoadReport {
            strategy: LoadStrategy::CopyFrom,
            rows_created: 1250,
            elapsed: Duration::from_millis(42),
        };

        let summary = report.summary();
        assert!(summary.starts_with("Created 1250 rows in "));
        assert!(summary.ends_with("using PostgreSQL COPY FROM"));
    }
}
