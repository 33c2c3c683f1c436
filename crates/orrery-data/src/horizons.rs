//! JPL Horizons ephemeris client
//!
//! One GET against the Horizons API; the records under `ephem` are turned
//! into a scaled point sequence. Parsing is separate from transport so a
//! response body can be checked without the network.

use crate::error::{EphemerisError, EphemerisResult};
use orrery_core::{Position3D, TrajectorySample};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

pub const HORIZONS_ENDPOINT: &str = "https://ssd-api.jpl.nasa.gov/horizons.api";

/// Query sent to Horizons
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonsQuery {
    pub endpoint: String,
    /// Target body designation
    pub command: String,
    pub start_time: String,
    pub stop_time: String,
    pub step_size: String,
    /// Request timeout in seconds; None keeps the client default
    pub timeout_secs: Option<u64>,
}

impl Default for HorizonsQuery {
    fn default() -> Self {
        Self {
            endpoint: HORIZONS_ENDPOINT.to_string(),
            command: "2024 YR4".to_string(),
            start_time: "2023-01-01".to_string(),
            stop_time: "2032-12-31".to_string(),
            step_size: "1d".to_string(),
            timeout_secs: None,
        }
    }
}

impl HorizonsQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("command", self.command.clone()),
            ("format", "json".to_string()),
            ("make_ephem", "YES".to_string()),
            ("table_type", "OBSERVER".to_string()),
            ("start_time", self.start_time.clone()),
            ("stop_time", self.stop_time.clone()),
            ("step_size", self.step_size.clone()),
        ]
    }
}

/// Horizons emits coordinates as strings; accept plain numbers too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self, index: usize, axis: char) -> EphemerisResult<f64> {
        let parsed = match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(EphemerisError::InvalidCoordinate {
                index,
                axis,
                value: match self {
                    Self::Number(v) => v.to_string(),
                    Self::Text(s) => s.clone(),
                },
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EphemRecord {
    x: Coordinate,
    y: Coordinate,
    z: Coordinate,
}

#[derive(Debug, Deserialize)]
struct HorizonsResponse {
    #[serde(default)]
    ephem: Option<Vec<EphemRecord>>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse a Horizons JSON body into a point sequence scaled by `scale`.
///
/// An empty record list is an error so callers never replace a good
/// trajectory with nothing.
pub fn parse_ephemeris(body: &str, scale: f64) -> EphemerisResult<TrajectorySample> {
    let response: HorizonsResponse = serde_json::from_str(body)?;

    if let Some(message) = response.error {
        return Err(EphemerisError::Api(message));
    }

    let records = response.ephem.ok_or(EphemerisError::MissingEphem)?;
    if records.is_empty() {
        return Err(EphemerisError::Empty);
    }

    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Ok(Position3D::new(
                r.x.value(i, 'x')?,
                r.y.value(i, 'y')?,
                r.z.value(i, 'z')?,
            )
            .scaled(scale))
        })
        .collect::<EphemerisResult<Vec<_>>>()
        .map(TrajectorySample::new)
}

/// Anything that can produce a Horizons response body
pub trait EphemerisSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = EphemerisResult<String>> + Send;

    /// Short description for log lines
    fn describe(&self) -> String {
        "ephemeris source".to_string()
    }
}

/// reqwest-backed Horizons client
pub struct HorizonsClient {
    client: reqwest::Client,
    query: HorizonsQuery,
}

impl HorizonsClient {
    pub fn new(query: HorizonsQuery) -> EphemerisResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("orrery/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = query.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            query,
        })
    }

    pub fn query(&self) -> &HorizonsQuery {
        &self.query
    }

    /// Fetch and parse in one go
    pub async fn fetch_trajectory(&self, scale: f64) -> EphemerisResult<TrajectorySample> {
        let body = self.fetch().await?;
        parse_ephemeris(&body, scale)
    }
}

impl EphemerisSource for HorizonsClient {
    async fn fetch(&self) -> EphemerisResult<String> {
        tracing::debug!("GET {} command={:?}", self.query.endpoint, self.query.command);

        let response = self
            .client
            .get(&self.query.endpoint)
            .query(&self.query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EphemerisError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        format!("Horizons {:?}", self.query.command)
    }
}
