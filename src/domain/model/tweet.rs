use crate::domain::interface::ITokenizer;
use crate::domain::model::feed_error::FeedError;
use crate::domain::model::geo::{self, GeoError, GeomSource, Point, Srid, WGS84_SRID};
use crate::domain::model::text::normalize;
use crate::domain::model::timestamp::{self, iso8601_format, iso8601utc_parse};
use crate::domain::model::tokens::{tokenize_fields, FieldAlias};
use crate::domain::model::TweetID;
use crate::error::*;
use crate::repository::RowError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::*;
use serde_json::Value;

/// Flat-file form of a tweet: one optional cell per column, absent = `None`.
pub type Row = Vec<Option<String>>;

/// Number of columns in a [`Row`].
pub const ROW_WIDTH: usize = 11;

/// Column names of a [`Row`], in order.
pub const ROW_COLUMNS: [&str; ROW_WIDTH] = [
    "tweet_id",
    "created_at",
    "text",
    "user_screen_name",
    "user_description",
    "user_lang",
    "user_location",
    "user_time_zone",
    "lon",
    "lat",
    "geom_src",
];

/// In-process interchange form of a tweet.
pub type TweetDict = IndexMap<String, Value>;

/// Keys of a [`TweetDict`], in the order `to_dict` emits them.
pub const DICT_KEYS: [&str; 10] = [
    "tweet_id",
    "created_at",
    "text",
    "user_screen_name",
    "user_description",
    "user_lang",
    "user_location",
    "user_time_zone",
    "geom",
    "geom_src",
];

#[derive(Debug)]
pub enum DictError {
    MissingKey,
    InvalidValue,
}

impl IFormatError for DictError {
    fn error_type(&self) -> String {
        use DictError::*;

        match self {
            MissingKey => "missing_key",
            InvalidValue => "invalid_value",
        }
        .to_string()
    }
}

/// One status from the stream.
///
/// Every string field has been through [`normalize`] (or came from a row or
/// dict that was produced from such a tweet). `geom` and `geom_src` are either
/// both present or both absent. Nothing changes after construction except the
/// token cache filled by [`Tweet::tokenize`].
#[derive(Debug, Clone)]
pub struct Tweet {
    id: TweetID,
    created_at: DateTime<Utc>,
    text: Option<String>,
    user_screen_name: Option<String>,
    user_description: Option<String>,
    user_lang: Option<String>,
    user_location: Option<String>,
    user_time_zone: Option<String>,
    geom: Option<Point>,
    geom_src: Option<GeomSource>,
    tokens: Option<Vec<String>>,
}

// `tokens` is a cache and none of the stored forms carry it
impl PartialEq for Tweet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.created_at == other.created_at
            && self.text == other.text
            && self.user_screen_name == other.user_screen_name
            && self.user_description == other.user_description
            && self.user_lang == other.user_lang
            && self.user_location == other.user_location
            && self.user_time_zone == other.user_time_zone
            && self.geom == other.geom
            && self.geom_src == other.geom_src
    }
}

fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

// Keys we read from a feed status. `nullable` fields must be present but may
// be null; `lang` only exists in newer API versions.
#[derive(Deserialize)]
struct FeedStatus {
    id: TweetID,
    created_at: String,
    #[serde(deserialize_with = "nullable")]
    text: Option<String>,
    user: FeedUser,
    #[serde(default)]
    coordinates: Option<Value>,
}

#[derive(Deserialize)]
struct FeedUser {
    #[serde(deserialize_with = "nullable")]
    screen_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    description: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(deserialize_with = "nullable")]
    location: Option<String>,
    #[serde(deserialize_with = "nullable")]
    time_zone: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct TweetDictRecord {
    tweet_id: TweetID,
    #[serde(with = "timestamp::serde_iso8601")]
    created_at: DateTime<Utc>,
    text: Option<String>,
    user_screen_name: Option<String>,
    user_description: Option<String>,
    user_lang: Option<String>,
    user_location: Option<String>,
    user_time_zone: Option<String>,
    geom: Option<Point>,
    geom_src: Option<GeomSource>,
}

impl Tweet {
    /// Build a tweet from a feed status object.
    ///
    /// The geotag is read from `coordinates` only; the legacy `geo` field has
    /// latitude first and is ignored. A missing, null or non-Point
    /// `coordinates` leaves the tweet without a geotag.
    pub fn from_json(json: &Value) -> Result<Tweet> {
        let status = FeedStatus::deserialize(json)
            .map_err(|err| FormatError::new(FeedError::InvalidTweet, err))?;
        let created_at = timestamp::twitter_timestamp_parse(&status.created_at)?;
        let geom = geom_from_coordinates(status.coordinates.as_ref())?;
        let tw = Tweet {
            id: status.id,
            created_at,
            text: normalize(status.text.as_deref()),
            user_screen_name: normalize(status.user.screen_name.as_deref()),
            user_description: normalize(status.user.description.as_deref()),
            user_lang: normalize(status.user.lang.as_deref()),
            user_location: normalize(status.user.location.as_deref()),
            user_time_zone: normalize(status.user.time_zone.as_deref()),
            geom_src: geom.map(|_| GeomSource::Coordinates),
            geom,
            tokens: None,
        };
        Ok(tw)
    }

    /// Inverse of [`Tweet::to_row`]. Cells are taken as already normalized.
    pub fn from_row(row: &[Option<String>]) -> Result<Tweet> {
        if row.len() != ROW_WIDTH {
            return Err(FormatError::new(
                RowError::RowShape,
                anyhow::anyhow!("expected {} fields, got {}", ROW_WIDTH, row.len()),
            ));
        }
        let id = required_cell(row, 0)?.parse::<TweetID>()?;
        let created_at = iso8601utc_parse(required_cell(row, 1)?)?;
        let geom = geo::derive(row[8].as_deref(), row[9].as_deref())?;
        let geom_src = row[10].as_deref().map(str::parse::<GeomSource>).transpose()?;
        check_geom_source(geom.as_ref(), geom_src)?;
        Ok(Tweet {
            id,
            created_at,
            text: non_empty(row[2].clone()),
            user_screen_name: non_empty(row[3].clone()),
            user_description: non_empty(row[4].clone()),
            user_lang: non_empty(row[5].clone()),
            user_location: non_empty(row[6].clone()),
            user_time_zone: non_empty(row[7].clone()),
            geom,
            geom_src,
            tokens: None,
        })
    }

    /// Inverse of [`Tweet::to_dict`]. Values are taken as they are, except
    /// that an empty string counts as absent, as it does in a row. A `geom`
    /// must be one that [`geo::derive`] could have produced: WGS84, finite and
    /// not (0, 0).
    pub fn from_dict(dict: &TweetDict) -> Result<Tweet> {
        if let Some(key) = DICT_KEYS.iter().find(|key| !dict.contains_key(**key)) {
            return Err(FormatError::new(
                DictError::MissingKey,
                anyhow::anyhow!("dict has no {:?} key", key),
            ));
        }
        let object = dict
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<serde_json::Map<String, Value>>();
        let record: TweetDictRecord = serde_json::from_value(Value::Object(object))
            .map_err(|err| FormatError::new(DictError::InvalidValue, err))?;
        let geom = record.geom.map(check_dict_point).transpose()?;
        check_geom_source(geom.as_ref(), record.geom_src)?;
        Ok(Tweet {
            id: record.tweet_id,
            created_at: record.created_at,
            text: non_empty(record.text),
            user_screen_name: non_empty(record.user_screen_name),
            user_description: non_empty(record.user_description),
            user_lang: non_empty(record.user_lang),
            user_location: non_empty(record.user_location),
            user_time_zone: non_empty(record.user_time_zone),
            geom,
            geom_src: record.geom_src,
            tokens: None,
        })
    }

    pub fn to_row(&self) -> Row {
        let (lon, lat) = match &self.geom {
            Some(point) => (Some(point.lon().to_string()), Some(point.lat().to_string())),
            None => (None, None),
        };
        vec![
            Some(self.id.to_string()),
            Some(iso8601_format(&self.created_at)),
            self.text.clone(),
            self.user_screen_name.clone(),
            self.user_description.clone(),
            self.user_lang.clone(),
            self.user_location.clone(),
            self.user_time_zone.clone(),
            lon,
            lat,
            self.geom_src.map(|src| src.as_str().to_string()),
        ]
    }

    pub fn to_dict(&self) -> Result<TweetDict> {
        let record = TweetDictRecord {
            tweet_id: self.id,
            created_at: self.created_at,
            text: self.text.clone(),
            user_screen_name: self.user_screen_name.clone(),
            user_description: self.user_description.clone(),
            user_lang: self.user_lang.clone(),
            user_location: self.user_location.clone(),
            user_time_zone: self.user_time_zone.clone(),
            geom: self.geom,
            geom_src: self.geom_src,
        };
        match serde_json::to_value(record)? {
            Value::Object(object) => Ok(object.into_iter().collect()),
            other => Err(GeneralError::serialization_error(anyhow::anyhow!(
                "tweet serialized to {} instead of an object",
                other
            ))),
        }
    }

    /// Tokenize `fields` with `tker` and keep the result as this tweet's
    /// tokens, replacing any earlier tokenization.
    pub fn tokenize<T>(&mut self, tker: &T, fields: &[FieldAlias], unify: bool) -> &[String]
    where
        T: ITokenizer + ?Sized,
    {
        let tokens = tokenize_fields(self, tker, fields, unify);
        self.tokens.insert(tokens).as_slice()
    }

    pub fn id(&self) -> TweetID {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `created_at` as `YYYY-MM-DD`.
    pub fn day(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn user_screen_name(&self) -> Option<&str> {
        self.user_screen_name.as_deref()
    }

    pub fn user_description(&self) -> Option<&str> {
        self.user_description.as_deref()
    }

    pub fn user_lang(&self) -> Option<&str> {
        self.user_lang.as_deref()
    }

    pub fn user_location(&self) -> Option<&str> {
        self.user_location.as_deref()
    }

    pub fn user_time_zone(&self) -> Option<&str> {
        self.user_time_zone.as_deref()
    }

    pub fn geom(&self) -> Option<&Point> {
        self.geom.as_ref()
    }

    pub fn geom_src(&self) -> Option<GeomSource> {
        self.geom_src
    }

    pub fn is_geotagged(&self) -> bool {
        self.geom.is_some()
    }

    pub fn tokens(&self) -> Option<&[String]> {
        self.tokens.as_deref()
    }
}

fn required_cell(row: &[Option<String>], index: usize) -> Result<&str> {
    row[index].as_deref().ok_or_else(|| {
        FormatError::new(
            RowError::InvalidCell,
            anyhow::anyhow!("column {} ({}) is empty", index, ROW_COLUMNS[index]),
        )
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

// Rows carry no srid and read (0, 0) as absent, so a dict point outside what
// `geo::derive` yields would not survive a trip through a row.
fn check_dict_point(point: Point) -> Result<Point> {
    if point.srid() != Srid::wgs84() {
        return Err(FormatError::new(
            GeoError::InvalidCoordinate,
            anyhow::anyhow!("expected srid {}, got {}", WGS84_SRID, point.srid().value()),
        ));
    }
    match geo::derive(Some(point.lon()), Some(point.lat()))? {
        Some(_) => Ok(point),
        None => Err(FormatError::new(
            GeoError::InvalidCoordinate,
            anyhow::anyhow!("({}, {}) is not a geotag", point.lon(), point.lat()),
        )),
    }
}

fn check_geom_source(geom: Option<&Point>, geom_src: Option<GeomSource>) -> Result<()> {
    if geom.is_some() == geom_src.is_some() {
        Ok(())
    } else {
        Err(FormatError::new(
            GeoError::InconsistentSource,
            anyhow::anyhow!(
                "geometry is {} but its source is {}",
                if geom.is_some() { "present" } else { "absent" },
                if geom_src.is_some() { "present" } else { "absent" },
            ),
        ))
    }
}

// `coordinates` is GeoJSON: {"type": "Point", "coordinates": [lon, lat]}.
fn geom_from_coordinates(coordinates: Option<&Value>) -> Result<Option<Point>> {
    let object = match coordinates {
        Some(Value::Object(object)) => object,
        _ => return Ok(None),
    };
    if object.get("type").and_then(Value::as_str) != Some("Point") {
        return Ok(None);
    }
    let pair = match object.get("coordinates") {
        Some(Value::Array(pair)) => pair,
        _ => return Ok(None),
    };
    if pair.len() < 2 {
        return Err(FormatError::new(
            GeoError::InvalidCoordinate,
            anyhow::anyhow!("Point has {} positions, expected 2", pair.len()),
        ));
    }
    let lon = Some(&pair[0]).filter(|v| !v.is_null());
    let lat = Some(&pair[1]).filter(|v| !v.is_null());
    geo::derive(lon, lat)
}
