use serde_json::Value;

/// A feed message that carries no tweet and is dropped after classification.
pub trait IgnoredObject: Sized {
    /// Top-level key that marks this message kind.
    const KEY: &'static str;

    fn from_json(json: &Value) -> Self;
}

/// A user deleted a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DeletionNotice;

/// A user cleared location data from their past statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScrubGeoNotice;

/// A status is withheld in some countries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatusWithheldNotice;

impl IgnoredObject for DeletionNotice {
    const KEY: &'static str = "delete";

    fn from_json(_json: &Value) -> Self {
        DeletionNotice
    }
}

impl IgnoredObject for ScrubGeoNotice {
    const KEY: &'static str = "scrub_geo";

    fn from_json(_json: &Value) -> Self {
        ScrubGeoNotice
    }
}

impl IgnoredObject for StatusWithheldNotice {
    const KEY: &'static str = "status_withheld";

    fn from_json(_json: &Value) -> Self {
        StatusWithheldNotice
    }
}
