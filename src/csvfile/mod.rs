//! The CSV interchange file shared by both load strategies.
//!
//! Six columns in fixed order, no header row. The photo blob is armored as
//! `\x`-prefixed hex — the PostgreSQL bytea input format — so the exact same
//! file can be streamed through `COPY ... WITH (FORMAT csv)` and parsed back
//! for the batched-insert path. An absent photo is an empty (unquoted) field,
//! which COPY reads as NULL.

use std::path::Path;

use crate::errors::CsvFileError;
use crate::models::SpeakerRecord;

/// Column order of the interchange file and of the COPY statement.
pub const COLUMNS: [&str; 6] = [
    "first_name",
    "last_name",
    "title",
    "company",
    "speaker_bio",
    "speaker_photo",
];

pub fn write_records(path: &Path, records: &[SpeakerRecord]) -> Result<(), CsvFileError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    for record in records {
        let photo = encode_photo(record.speaker_photo.as_deref());
        writer.write_record([
            record.first_name.as_str(),
            record.last_name.as_str(),
            record.title.as_str(),
            record.company.as_str(),
            record.speaker_bio.as_str(),
            photo.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<SpeakerRecord>, CsvFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() != COLUMNS.len() {
            return Err(CsvFileError::Columns {
                expected: COLUMNS.len(),
                found: row.len(),
            });
        }

        records.push(SpeakerRecord {
            first_name: row[0].to_string(),
            last_name: row[1].to_string(),
            title: row[2].to_string(),
            company: row[3].to_string(),
            speaker_bio: row[4].to_string(),
            speaker_photo: decode_photo(&row[5])?,
        });
    }

    Ok(records)
}

fn encode_photo(photo: Option<&[u8]>) -> String {
    match photo {
        Some(bytes) => format!("\\x{}", hex::encode(bytes)),
        None => String::new(),
    }
}

fn decode_photo(field: &str) -> Result<Option<Vec<u8>>, CsvFileError> {
    if field.is_empty() {
        return Ok(None);
    }
    let digits = field.strip_prefix("\\x").unwrap_or(field);
    Ok(Some(hex::decode(digits)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(first: &str, bio: &str, photo: Option<&[u8]>) -> SpeakerRecord {
        SpeakerRecord {
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            title: "Speaker".to_string(),
            company: "Acme, Inc.".to_string(),
            speaker_bio: bio.to_string(),
            speaker_photo: photo.map(<[u8]>::to_vec),
        }
    }

    #[test]
    fn round_trip_preserves_fields_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speakers.csv");

        let records = vec![
            record("Ada", "Writes \"code\", likes commas, and\nnewlines", None),
            record("Grace", "plain bio", Some(&[0x00, 0x01, 0xff])),
            record("Alan", "", Some(b"png-bytes")),
        ];

        write_records(&path, &records).unwrap();
        let back = read_records(&path).unwrap();

        assert_eq!(back, records);
    }

    #[test]
    fn empty_input_round_trips_to_no_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speakers.csv");

        write_records(&path, &[]).unwrap();
        assert_eq!(read_records(&path).unwrap(), Vec::new());
    }

    #[test]
    fn photo_column_is_postgres_hex_armored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speakers.csv");

        write_records(&path, &[record("Ada", "bio", Some(&[0xde, 0xad]))]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let last_field = raw.trim_end().rsplit(',').next().unwrap();
        assert_eq!(last_field, "\\xdead");
    }

    #[test]
    fn missing_photo_is_an_empty_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speakers.csv");

        write_records(&path, &[record("Ada", "bio", None)]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.trim_end().ends_with(','));
    }

    #[test]
    fn short_row_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speakers.csv");
        std::fs::write(&path, "only,three,columns\n").unwrap();

        match read_records(&path) {
            Err(CsvFileError::Columns { expected: 6, found: 3 }) => {}
            other => panic!("expected column-count error, got {other:?}"),
        }
    }

    #[test]
    fn garbled_photo_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speakers.csv");
        std::fs::write(&path, "a,b,c,d,e,\\xnothex\n").unwrap();

        assert!(matches!(
            read_records(&path),
            Err(CsvFileError::Photo(_))
        ));
    }
}
