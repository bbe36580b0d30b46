//! Builds the table that maps a layout key to its ordered list of valid
//! time spans, resolving the document's index indirection.

use crate::forecast::envelope::Dwml;
use crate::forecast::error::ForecastError;
use crate::types::time_span::TimeSpan;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One entry per `time-layout` in the document, built once and consulted
/// for every parameter section that references it.
#[derive(Debug, Clone)]
pub(crate) struct TimeLayoutTable {
    spans: HashMap<String, Vec<TimeSpan>>,
}

impl TimeLayoutTable {
    /// A layout without end times (or with a mismatched number of them)
    /// collapses each span to its start instant.
    pub(crate) fn from_document(dwml: &Dwml) -> Result<Self, ForecastError> {
        let mut spans = HashMap::new();

        for layout in &dwml.data.time_layouts {
            let starts = &layout.start_valid_times;
            let ends = &layout.end_valid_times;
            let paired = ends.len() == starts.len();

            let mut list = Vec::with_capacity(starts.len());
            for (i, start) in starts.iter().enumerate() {
                let begin = parse_valid_time(start)?;
                let end = if paired {
                    parse_valid_time(&ends[i])?
                } else {
                    begin
                };
                list.push(TimeSpan::new(begin, end));
            }

            spans.insert(layout.layout_key.clone(), list);
        }

        Ok(Self { spans })
    }

    pub(crate) fn get(&self, key: &str) -> Option<&[TimeSpan]> {
        self.spans.get(key).map(Vec::as_slice)
    }
}

fn parse_valid_time(value: &str) -> Result<DateTime<Utc>, ForecastError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| ForecastError::TimestampParse {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::envelope::{decode_document, TimeLayout};
    use chrono::TimeZone;

    fn document_with_layout(layout: TimeLayout) -> Dwml {
        let mut dwml = Dwml::default();
        dwml.data.time_layouts.push(layout);
        dwml
    }

    #[test]
    fn builds_point_spans_when_end_times_are_absent() {
        let dwml = decode_document(crate::forecast::envelope::fixtures::SAMPLE_DOCUMENT)
            .expect("sample document should decode");
        let table = TimeLayoutTable::from_document(&dwml).expect("table should build");

        let spans = table.get("k-p1h-n3-1").expect("layout key should resolve");
        assert_eq!(spans.len(), 3);
        // 06:00 -05:00 is 11:00 UTC.
        let first = Utc.with_ymd_and_hms(2014, 1, 1, 11, 0, 0).unwrap();
        assert_eq!(spans[0].begin(), first);
        assert_eq!(spans[0].end(), first, "missing end times collapse to points");
    }

    #[test]
    fn pairs_end_times_when_counts_match() {
        let dwml = document_with_layout(TimeLayout {
            layout_key: "k-p12h-n1-1".to_string(),
            start_valid_times: vec!["2014-01-01T06:00:00-05:00".to_string()],
            end_valid_times: vec!["2014-01-01T18:00:00-05:00".to_string()],
            ..TimeLayout::default()
        });

        let table = TimeLayoutTable::from_document(&dwml).expect("table should build");
        let spans = table.get("k-p12h-n1-1").expect("layout key should resolve");
        assert_eq!(
            spans[0].end() - spans[0].begin(),
            chrono::TimeDelta::hours(12)
        );
    }

    #[test]
    fn unparsable_valid_time_fails_the_document() {
        let dwml = document_with_layout(TimeLayout {
            layout_key: "k-bad".to_string(),
            start_valid_times: vec!["not-a-time".to_string()],
            ..TimeLayout::default()
        });

        let err = TimeLayoutTable::from_document(&dwml)
            .expect_err("bad valid-time must fail the table");
        assert!(matches!(err, ForecastError::TimestampParse { .. }));
    }

    #[test]
    fn unknown_key_is_absent() {
        let table = TimeLayoutTable::from_document(&Dwml::default()).expect("table should build");
        assert!(table.get("k-missing").is_none());
    }
}
