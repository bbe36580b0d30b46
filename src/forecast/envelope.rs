//! Wire types for the gridded-forecast DWML document, and the decoder that
//! produces them.
//!
//! The document keys its parameter values indirectly: each parameter
//! section names a `time-layout`, and the layout's valid-time lists give
//! the instants its value array indexes into.

use crate::forecast::error::ForecastError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Dwml {
    pub head: Head,
    pub data: Data,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Head {
    pub product: Product,
    pub source: Source,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "concise-name")]
    pub concise_name: String,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde(rename = "production-center")]
    pub production_center: String,
    pub credit: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Data {
    pub location: Location,
    #[serde(rename = "time-layout")]
    pub time_layouts: Vec<TimeLayout>,
    pub parameters: Parameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(rename = "location-key")]
    pub location_key: String,
    pub point: Point,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimeLayout {
    #[serde(rename = "time-coordinate")]
    pub time_coordinate: String,
    pub summarization: String,
    #[serde(rename = "layout-key")]
    pub layout_key: String,
    #[serde(rename = "start-valid-time")]
    pub start_valid_times: Vec<String>,
    #[serde(rename = "end-valid-time")]
    pub end_valid_times: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub temperature: Vec<ParameterSection>,
    pub precipitation: Vec<ParameterSection>,
    #[serde(rename = "wind-speed")]
    pub wind_speed: Vec<ParameterSection>,
    pub direction: Vec<ParameterSection>,
    #[serde(rename = "cloud-amount")]
    pub cloud_amount: Vec<ParameterSection>,
    pub humidity: Vec<ParameterSection>,
}

/// One named parameter series: `kind` is the upstream `type` attribute
/// that distinguishes, say, hourly temperature from dew point.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParameterSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub units: String,
    #[serde(rename = "time-layout")]
    pub time_layout: String,
    pub name: String,
    #[serde(rename = "value")]
    pub values: Vec<String>,
}

pub(crate) fn decode_document(body: &str) -> Result<Dwml, ForecastError> {
    serde_xml_rs::from_str(body).map_err(ForecastError::DocumentDecode)
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub(crate) const SAMPLE_DOCUMENT: &str = r#"<?xml version="1.0"?>
<dwml version="1.0">
  <head>
    <product srsName="WGS 1984" concise-name="time-series" operational-mode="official">
      <title>NOAA's National Weather Service Forecast Data</title>
      <category>forecast</category>
    </product>
    <source>
      <production-center>Meteorological Development Laboratory</production-center>
      <credit>https://www.weather.gov/</credit>
    </source>
  </head>
  <data>
    <location>
      <location-key>point1</location-key>
      <point latitude="38.99" longitude="-77.01"/>
    </location>
    <time-layout time-coordinate="local" summarization="none">
      <layout-key>k-p1h-n3-1</layout-key>
      <start-valid-time>2014-01-01T06:00:00-05:00</start-valid-time>
      <start-valid-time>2014-01-01T07:00:00-05:00</start-valid-time>
      <start-valid-time>2014-01-01T08:00:00-05:00</start-valid-time>
    </time-layout>
    <parameters applicable-location="point1">
      <temperature type="hourly" units="Celsius" time-layout="k-p1h-n3-1">
        <name>Temperature</name>
        <value>7</value>
        <value>6</value>
        <value>5</value>
      </temperature>
      <temperature type="dew point" units="Celsius" time-layout="k-p1h-n3-1">
        <name>Dew Point Temperature</name>
        <value>2</value>
        <value>2</value>
        <value>1</value>
      </temperature>
      <wind-speed type="sustained" units="knots" time-layout="k-p1h-n3-1">
        <name>Wind Speed</name>
        <value>8</value>
        <value>9</value>
        <value>10</value>
      </wind-speed>
    </parameters>
  </data>
</dwml>"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::SAMPLE_DOCUMENT;
    use super::*;

    #[test]
    fn decodes_location_layouts_and_sections() {
        let dwml = decode_document(SAMPLE_DOCUMENT).expect("sample document should decode");

        assert_eq!(dwml.data.location.point.latitude, 38.99);
        assert_eq!(dwml.data.location.point.longitude, -77.01);

        assert_eq!(dwml.data.time_layouts.len(), 1);
        let layout = &dwml.data.time_layouts[0];
        assert_eq!(layout.layout_key, "k-p1h-n3-1");
        assert_eq!(layout.start_valid_times.len(), 3);
        assert!(layout.end_valid_times.is_empty());

        assert_eq!(dwml.data.parameters.temperature.len(), 2);
        let hourly = &dwml.data.parameters.temperature[0];
        assert_eq!(hourly.kind, "hourly");
        assert_eq!(hourly.units, "Celsius");
        assert_eq!(hourly.time_layout, "k-p1h-n3-1");
        assert_eq!(hourly.values, vec!["7", "6", "5"]);

        assert_eq!(dwml.data.parameters.wind_speed.len(), 1);
        assert!(dwml.data.parameters.precipitation.is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_document("{\"not\": \"xml\"}").expect_err("json body must not decode");
        assert!(matches!(err, ForecastError::DocumentDecode(_)));
    }
}
