//! Flattening reflections into fixed table columns

use super::traits::{StorageError, StorageResult};
use crate::form::{FormField, LinkType, Reflection, SubEntry, SUB_ENTRY_COUNT};

/// Column headers, one per form field, in form order
pub fn header() -> Vec<String> {
    FormField::ALL.iter().map(FormField::column).collect()
}

fn value_of(reflection: &Reflection, field: FormField) -> &str {
    match field {
        FormField::Name => &reflection.name,
        FormField::MainDesire => &reflection.main_desire,
        FormField::SubDesire(slot) => &reflection.entries[slot].sub_desire,
        FormField::Outcome(slot) => &reflection.entries[slot].outcome,
        FormField::LinkType(slot) => reflection.entries[slot].link_type.as_str(),
    }
}

/// One table row for a reflection
pub fn to_record(reflection: &Reflection) -> Vec<&str> {
    FormField::ALL
        .into_iter()
        .map(|field| value_of(reflection, field))
        .collect()
}

/// Rebuild a reflection from a row; `row` is the 1-based data row number
pub(crate) fn from_record(record: &csv::StringRecord, row: usize) -> StorageResult<Reflection> {
    if record.len() != FormField::ALL.len() {
        return Err(StorageError::MalformedRow {
            row,
            reason: format!("expected {} columns, found {}", FormField::ALL.len(), record.len()),
        });
    }

    let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();
    let entry = |slot: usize| -> StorageResult<SubEntry> {
        let base = 2 + slot * 3;
        let link_type = cell(base + 2)
            .parse::<LinkType>()
            .map_err(|e| StorageError::MalformedRow {
                row,
                reason: e.to_string(),
            })?;
        Ok(SubEntry::new(cell(base), cell(base + 1), link_type))
    };
    let entries: [SubEntry; SUB_ENTRY_COUNT] = [entry(0)?, entry(1)?, entry(2)?];

    Ok(Reflection::new(cell(0), cell(1), entries))
}

/// Serialize a full table (header plus rows) as CSV bytes
pub fn write_table(reflections: &[Reflection]) -> StorageResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header())?;
    for reflection in reflections {
        writer.write_record(to_record(reflection))?;
    }
    writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflection() -> Reflection {
        Reflection::new(
            "Alice",
            "Main, with a comma",
            [
                SubEntry::new("S1", "", LinkType::Real),
                SubEntry::new("S2", "O2", LinkType::Spurious),
                SubEntry::new("S3", "O3 \"quoted\"", LinkType::Unclear),
            ],
        )
    }

    #[test]
    fn record_follows_column_order() {
        let r = reflection();
        assert_eq!(
            to_record(&r),
            vec![
                "Alice",
                "Main, with a comma",
                "S1",
                "",
                "Real",
                "S2",
                "O2",
                "Spurious",
                "S3",
                "O3 \"quoted\"",
                "Unclear",
            ]
        );
    }

    #[test]
    fn table_bytes_read_back() {
        let bytes = write_table(&[reflection()]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, header());

        let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(from_record(&records[0], 1).unwrap(), reflection());
    }

    #[test]
    fn short_rows_are_rejected() {
        let record = csv::StringRecord::from(vec!["Alice", "Main"]);
        let err = from_record(&record, 3).unwrap_err();
        assert!(matches!(err, StorageError::MalformedRow { row: 3, .. }));
    }

    #[test]
    fn unknown_link_type_is_rejected() {
        let binding = reflection();
        let mut values = to_record(&binding);
        values[4] = "Sometimes";
        let record = csv::StringRecord::from(values);
        let err = from_record(&record, 1).unwrap_err();
        assert!(err.to_string().contains("Sometimes"));
    }
}
