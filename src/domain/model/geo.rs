use crate::error::*;
use serde::*;

/// Spatial reference id of WGS84 longitude/latitude.
pub const WGS84_SRID: i32 = 4326;

#[derive(Debug)]
pub enum GeoError {
    InvalidCoordinate,
    InconsistentSource,
    UnknownSource,
}

impl IFormatError for GeoError {
    fn error_type(&self) -> String {
        use GeoError::*;

        match self {
            InvalidCoordinate => "invalid_coordinate",
            InconsistentSource => "inconsistent_geometry_source",
            UnknownSource => "unknown_geometry_source",
        }
        .to_string()
    }

    fn disposition(&self) -> Disposition {
        Disposition::Abort
    }
}

impl From<std::num::ParseFloatError> for FormatError {
    fn from(err: std::num::ParseFloatError) -> FormatError {
        FormatError::new(GeoError::InvalidCoordinate, err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Srid(i32);

impl Srid {
    pub fn try_new(srid: i32) -> Result<Srid> {
        if srid > 0 {
            Ok(Srid(srid))
        } else {
            Err(FormatError::new(
                GeoError::InvalidCoordinate,
                anyhow::anyhow!("srid must be positive, got {}", srid),
            ))
        }
    }

    pub fn wgs84() -> Srid {
        Srid(WGS84_SRID)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

derive_newtype_serde!(Srid, i32; Srid::try_new, "srid must be a positive integer");

/// A geotag: one coordinate pair in a spatial reference.
///
/// Storage of points belongs to whoever consumes them; this type only carries
/// the value between the feed, row and dict forms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJsonPoint", try_from = "GeoJsonPoint")]
pub struct Point {
    lon: f64,
    lat: f64,
    srid: Srid,
}

impl Point {
    pub fn new(lon: f64, lat: f64, srid: Srid) -> Point {
        Point { lon, lat, srid }
    }

    pub fn wgs84(lon: f64, lat: f64) -> Point {
        Point::new(lon, lat, Srid::wgs84())
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    pub fn srid(&self) -> Srid {
        self.srid
    }

    /// Same position, ignoring the spatial reference.
    pub fn same_coords(&self, other: &Point) -> bool {
        self.coords() == other.coords()
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type")]
    kind: String,
    srid: Srid,
    coordinates: [f64; 2],
}

impl From<Point> for GeoJsonPoint {
    fn from(point: Point) -> Self {
        GeoJsonPoint {
            kind: "Point".to_string(),
            srid: point.srid,
            coordinates: [point.lon, point.lat],
        }
    }
}

impl TryFrom<GeoJsonPoint> for Point {
    type Error = String;

    fn try_from(value: GeoJsonPoint) -> std::result::Result<Self, Self::Error> {
        if value.kind != "Point" {
            return Err(format!("expected a Point geometry, got {}", value.kind));
        }
        let [lon, lat] = value.coordinates;
        Ok(Point::new(lon, lat, value.srid))
    }
}

/// Which feed field a tweet's geometry was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeomSource {
    /// The GeoJSON `coordinates` object.
    #[serde(rename = "co")]
    Coordinates,
}

impl GeomSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeomSource::Coordinates => "co",
        }
    }
}

impl std::fmt::Display for GeomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GeomSource {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "co" => Ok(GeomSource::Coordinates),
            other => Err(FormatError::new(
                GeoError::UnknownSource,
                anyhow::anyhow!("unknown geometry source tag {:?}", other),
            )),
        }
    }
}

/// Anything a coordinate can arrive as: a JSON number, a TSV cell, a float.
pub trait ToCoordinate {
    fn to_coordinate(&self) -> Result<f64>;
}

impl ToCoordinate for f64 {
    fn to_coordinate(&self) -> Result<f64> {
        Ok(*self)
    }
}

impl ToCoordinate for &str {
    fn to_coordinate(&self) -> Result<f64> {
        Ok(self.trim().parse::<f64>()?)
    }
}

impl ToCoordinate for String {
    fn to_coordinate(&self) -> Result<f64> {
        self.as_str().to_coordinate()
    }
}

impl ToCoordinate for &serde_json::Value {
    fn to_coordinate(&self) -> Result<f64> {
        use serde_json::Value;

        match self {
            Value::Number(n) => n.as_f64().ok_or_else(|| {
                FormatError::new(
                    GeoError::InvalidCoordinate,
                    anyhow::anyhow!("coordinate {} is not representable as f64", n),
                )
            }),
            Value::String(s) => s.as_str().to_coordinate(),
            other => Err(FormatError::new(
                GeoError::InvalidCoordinate,
                anyhow::anyhow!("coordinate must be a number or string, got {}", other),
            )),
        }
    }
}

/// Turn a longitude/latitude pair into a WGS84 point.
///
/// Returns `Ok(None)` when either side is missing or both are exactly zero;
/// (0, 0) marks "no location" in the feed, so a tweet really posted there
/// loses its geotag. Unparseable or non-finite values are an error.
pub fn derive<L, R>(lon: Option<L>, lat: Option<R>) -> Result<Option<Point>>
where
    L: ToCoordinate,
    R: ToCoordinate,
{
    let (lon, lat) = match (lon, lat) {
        (Some(lon), Some(lat)) => (lon.to_coordinate()?, lat.to_coordinate()?),
        _ => return Ok(None),
    };
    if !lon.is_finite() || !lat.is_finite() {
        return Err(FormatError::new(
            GeoError::InvalidCoordinate,
            anyhow::anyhow!("coordinates must be finite, got ({}, {})", lon, lat),
        ));
    }
    if lon == 0.0 && lat == 0.0 {
        return Ok(None);
    }
    Ok(Some(Point::wgs84(lon, lat)))
}
