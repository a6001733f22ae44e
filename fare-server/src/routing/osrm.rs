//! OSRM HTTP client.

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::debug;

use crate::domain::LocationRecord;

use super::error::RoutingError;
use super::resolver::DistanceResolver;

/// Default base URL for a locally hosted OSRM instance.
const DEFAULT_BASE_URL: &str = "http://localhost:5111";

/// Upper bound on a health check, independent of the route timeout.
const PING_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

/// Point used for the health check (central Dhaka).
const PING_POINT: (f64, f64) = (23.8103, 90.3563);

/// Route response from `/route/v1/driving`.
#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Route length in metres.
    distance: f64,
}

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for an OSRM driving-directions server.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Driving distance in kilometres between two locations.
    pub async fn route_km(
        &self,
        start: &LocationRecord,
        end: &LocationRecord,
    ) -> Result<f64, RoutingError> {
        let url = route_url(&self.base_url, (start.lat, start.lon), (end.lat, end.lon));

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let km = parse_route_km(&body)?;
        debug!(from = %start.name_en, to = %end.name_en, km, "OSRM route");
        Ok(km)
    }

    /// Whether the server answers a trivial route request.
    pub async fn is_reachable(&self) -> bool {
        let url = route_url(&self.base_url, PING_POINT, PING_POINT);
        match self.http.get(&url).timeout(PING_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "OSRM health check failed");
                false
            }
        }
    }
}

impl DistanceResolver for OsrmClient {
    fn resolve_km<'a>(
        &'a self,
        start: &'a LocationRecord,
        end: &'a LocationRecord,
    ) -> BoxFuture<'a, Result<f64, RoutingError>> {
        Box::pin(self.route_km(start, end))
    }

    fn ping(&self) -> BoxFuture<'_, bool> {
        Box::pin(self.is_reachable())
    }
}

/// URL for a driving route between two `(lat, lon)` points.
///
/// OSRM takes coordinates as `lon,lat`.
fn route_url(base_url: &str, from: (f64, f64), to: (f64, f64)) -> String {
    format!(
        "{}/route/v1/driving/{:.6},{:.6};{:.6},{:.6}?overview=false",
        base_url, from.1, from.0, to.1, to.0
    )
}

/// Extract the first route's length, in kilometres, from a response body.
fn parse_route_km(body: &str) -> Result<f64, RoutingError> {
    let response: RouteResponse = serde_json::from_str(body).map_err(|e| RoutingError::Json {
        message: e.to_string(),
    })?;

    let route = response
        .routes
        .first()
        .ok_or_else(|| RoutingError::NoRoute {
            code: response.code.clone(),
        })?;

    Ok(route.distance / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn route_url_uses_lon_lat_order() {
        let url = route_url("http://osrm.test", (23.8069, 90.3687), (23.733, 90.4172));
        assert_eq!(
            url,
            "http://osrm.test/route/v1/driving/90.368700,23.806900;90.417200,23.733000?overview=false"
        );
    }

    #[test]
    fn parse_first_route_in_km() {
        let body = r#"{"code":"Ok","routes":[{"distance":12345.6,"duration":900.1},{"distance":1.0}]}"#;
        let km = parse_route_km(body).unwrap();
        assert!((km - 12.3456).abs() < 1e-9);
    }

    #[test]
    fn parse_empty_routes() {
        let err = parse_route_km(r#"{"code":"NoRoute","routes":[]}"#).unwrap_err();
        assert!(matches!(err, RoutingError::NoRoute { code } if code == "NoRoute"));
    }

    #[test]
    fn parse_missing_routes() {
        let err = parse_route_km(r#"{"code":"InvalidQuery"}"#).unwrap_err();
        assert!(matches!(err, RoutingError::NoRoute { .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = parse_route_km("not json").unwrap_err();
        assert!(matches!(err, RoutingError::Json { .. }));
    }

    #[test]
    fn parse_non_numeric_distance() {
        let err = parse_route_km(r#"{"routes":[{"distance":"far"}]}"#).unwrap_err();
        assert!(matches!(err, RoutingError::Json { .. }));
    }
}
