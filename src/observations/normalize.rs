//! Flat-record normalization: each result row already carries its own
//! absolute date and station id, so this is a 1:1 projection plus one date
//! parse.

use crate::observations::envelope::StationRecord;
use crate::observations::error::ObservationError;
use crate::types::observation::{Observation, Site};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use log::debug;

/// Projects one result row into an [`Observation`].
///
/// Returns `Ok(None)` for rows whose value is a non-finite sentinel. An
/// unparsable date is structural breakage, not a missing cell, and fails
/// the fetch.
pub(crate) fn normalize_record(
    record: StationRecord,
) -> Result<Option<Observation>, ObservationError> {
    if !record.value.is_finite() {
        debug!(
            "skipping non-finite {} value for station {} on {}",
            record.datatype, record.station, record.date
        );
        return Ok(None);
    }

    let Some(timestamp) = record_timestamp(&record.date) else {
        return Err(ObservationError::DateParse {
            date: record.date,
            station: record.station,
        });
    };

    Ok(Some(Observation {
        name: record.datatype,
        value: record.value,
        units: None,
        timestamp,
        site: Site::Station(record.station),
        attributes: record.attributes,
    }))
}

/// The upstream emits `%Y-%m-%dT%H:%M:%S`; bare dates also occur and read
/// as midnight. Both are taken as UTC.
fn record_timestamp(date: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, value: f64) -> StationRecord {
        StationRecord {
            attributes: Some(",,W,2400".to_string()),
            datatype: "PRCP".to_string(),
            date: date.to_string(),
            station: "GHCND:USW00094728".to_string(),
            value,
        }
    }

    #[test]
    fn copies_fields_verbatim_and_parses_midnight_date() {
        let observation = normalize_record(record("2014-01-01", 76.0))
            .expect("record should normalize")
            .expect("record should produce an observation");

        assert_eq!(observation.name, "PRCP");
        assert_eq!(observation.value, 76.0);
        assert_eq!(observation.units, None);
        assert_eq!(
            observation.timestamp,
            Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            observation.site,
            Site::Station("GHCND:USW00094728".to_string())
        );
        assert_eq!(observation.attributes.as_deref(), Some(",,W,2400"));
    }

    #[test]
    fn parses_the_datetime_exchange_format() {
        let observation = normalize_record(record("2014-01-01T18:00:00", 3.9))
            .expect("record should normalize")
            .expect("record should produce an observation");
        assert_eq!(
            observation.timestamp,
            Utc.with_ymd_and_hms(2014, 1, 1, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn skips_non_finite_values() {
        let skipped = normalize_record(record("2014-01-01", f64::NAN))
            .expect("non-finite value should not be an error");
        assert!(skipped.is_none());
    }

    #[test]
    fn unparsable_date_is_fatal() {
        let err = normalize_record(record("01/01/2014", 1.0))
            .expect_err("bad date must fail the record");
        assert!(matches!(err, ObservationError::DateParse { .. }));
    }
}
