//! Wire types for one page of the station-observation JSON API, and the
//! decoder that produces them.
//!
//! Every field defaults to its zero value: the upstream returns a bare `{}`
//! for an empty result set, which must decode to a page with `count` 0 so
//! pagination terminates normally.

use crate::observations::error::ObservationError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservationPage {
    pub metadata: PageMetadata,
    pub results: Vec<StationRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub resultset: Resultset,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Resultset {
    pub count: u64,
    pub limit: u64,
    pub offset: u64,
}

/// One result row: a named value for one station on one date, with the
/// upstream's measurement-flag string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationRecord {
    pub attributes: Option<String>,
    pub datatype: String,
    pub date: String,
    pub station: String,
    pub value: f64,
}

pub(crate) fn decode_page(url: &str, body: &str) -> Result<ObservationPage, ObservationError> {
    serde_json::from_str(body).map_err(|source| ObservationError::PageDecode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_page() {
        let body = r#"{
            "metadata": {"resultset": {"count": 2500, "limit": 1000, "offset": 1}},
            "results": [
                {
                    "attributes": ",,W,2400",
                    "datatype": "PRCP",
                    "date": "2014-01-01T00:00:00",
                    "station": "GHCND:USW00094728",
                    "value": 76.0
                }
            ]
        }"#;

        let page = decode_page("http://example/data", body).expect("page should decode");
        assert_eq!(page.metadata.resultset.count, 2500);
        assert_eq!(page.metadata.resultset.limit, 1000);
        assert_eq!(page.metadata.resultset.offset, 1);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].datatype, "PRCP");
        assert_eq!(page.results[0].value, 76.0);
    }

    #[test]
    fn empty_object_decodes_to_zero_values() {
        let page = decode_page("http://example/data", "{}").expect("empty page should decode");
        assert_eq!(page.metadata.resultset.count, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_page("http://example/data", "<html>oops</html>")
            .expect_err("html body must not decode");
        assert!(matches!(err, ObservationError::PageDecode { .. }));
    }
}
