use crate::domain::model::*;
use crate::error::*;
use serde_json::Value;

/// A classified feed message.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    Deletion(DeletionNotice),
    ScrubGeo(ScrubGeoNotice),
    StatusWithheld(StatusWithheldNotice),
    Tweet(Box<Tweet>),
}

impl FeedMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            FeedMessage::Deletion(_) => DeletionNotice::KEY,
            FeedMessage::ScrubGeo(_) => ScrubGeoNotice::KEY,
            FeedMessage::StatusWithheld(_) => StatusWithheldNotice::KEY,
            FeedMessage::Tweet(_) => "tweet",
        }
    }

    pub fn into_tweet(self) -> Option<Tweet> {
        match self {
            FeedMessage::Tweet(tw) => Some(*tw),
            _ => None,
        }
    }
}

/// Parse one feed message and build the object it describes.
///
/// Keys are checked in a fixed order, `delete`, `scrub_geo`,
/// `status_withheld`, then `text`, and the first one present decides. A
/// deletion notice that happens to carry a `text` key is still a deletion
/// notice.
pub fn classify(raw: &str) -> Result<FeedMessage> {
    if raw.trim().is_empty() {
        return Err(FormatError::only(FeedError::EmptyInput));
    }
    let json: Value = serde_json::from_str(raw)
        .map_err(|err| FormatError::new(FeedError::MalformedInput, err))?;
    let object = json.as_object().ok_or_else(|| {
        FormatError::new(
            FeedError::UnrecognizedVariant,
            anyhow::anyhow!("feed message is not a JSON object"),
        )
    })?;

    if object.contains_key(DeletionNotice::KEY) {
        Ok(FeedMessage::Deletion(DeletionNotice::from_json(&json)))
    } else if object.contains_key(ScrubGeoNotice::KEY) {
        Ok(FeedMessage::ScrubGeo(ScrubGeoNotice::from_json(&json)))
    } else if object.contains_key(StatusWithheldNotice::KEY) {
        Ok(FeedMessage::StatusWithheld(StatusWithheldNotice::from_json(
            &json,
        )))
    } else if object.contains_key("text") {
        Ok(FeedMessage::Tweet(Box::new(Tweet::from_json(&json)?)))
    } else {
        Err(FormatError::new(
            FeedError::UnrecognizedVariant,
            anyhow::anyhow!(
                "no known key among {} top-level keys",
                object.len()
            ),
        ))
    }
}

/// [`classify`] for a raw feed line. Bytes that aren't UTF-8 make the line
/// malformed; the error never carries them.
pub fn classify_bytes(raw: &[u8]) -> Result<FeedMessage> {
    let raw = std::str::from_utf8(raw).map_err(|err| {
        FormatError::new(
            FeedError::MalformedInput,
            anyhow::anyhow!("line is not UTF-8 after byte {}", err.valid_up_to()),
        )
    })?;
    classify(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::*;

    #[test]
    fn it_should_reject_blank_input() {
        for raw in ["", "   ", "\t\r\n"] {
            let err = classify(raw).unwrap_err();
            assert!(err.is_error_of(FeedError::EmptyInput));
        }
    }

    #[test]
    fn it_should_reject_malformed_input() {
        let err = classify("{not json").unwrap_err();
        assert!(err.is_error_of(FeedError::MalformedInput));
        assert_eq!(err.disposition(), Disposition::SkipRecord);
        assert_eq!(err.to_secure_error_report().error(), "");
        assert!(!err.to_log_line().contains("not json"));
    }

    #[test]
    fn it_should_reject_lines_that_are_not_text() {
        let err = classify_bytes(b"\xff\xfe garbage").unwrap_err();
        assert!(err.is_error_of(FeedError::MalformedInput));
        assert_eq!(err.disposition(), Disposition::SkipRecord);

        let msg = classify_bytes(T_DELETE_JSON.as_bytes()).unwrap();
        assert_eq!(msg.kind(), "delete");
    }

    #[test]
    fn it_should_reject_unknown_objects() {
        let err = classify(r#"{"foo":1}"#).unwrap_err();
        assert!(err.is_error_of(FeedError::UnrecognizedVariant));

        let err = classify("[1, 2]").unwrap_err();
        assert!(err.is_error_of(FeedError::UnrecognizedVariant));
    }

    #[test]
    fn it_should_classify_notices() {
        assert_eq!(
            classify(T_DELETE_JSON).unwrap(),
            FeedMessage::Deletion(DeletionNotice)
        );
        assert_eq!(
            classify(T_SCRUB_GEO_JSON).unwrap(),
            FeedMessage::ScrubGeo(ScrubGeoNotice)
        );
        assert_eq!(
            classify(T_WITHHELD_JSON).unwrap(),
            FeedMessage::StatusWithheld(StatusWithheldNotice)
        );
    }

    #[test]
    fn it_should_prefer_deletion_over_tweet() {
        let raw = r#"{"delete":{"status":{"id":1}},"text":"hello"}"#;
        let msg = classify(raw).unwrap();
        assert_eq!(msg.kind(), "delete");
        assert_eq!(msg.into_tweet(), None);

        let raw = r#"{"scrub_geo":{},"status_withheld":{}}"#;
        assert_eq!(classify(raw).unwrap().kind(), "scrub_geo");
    }

    #[test]
    fn it_should_build_tweets() {
        let msg = classify(T_TW_JSON_CO).unwrap();
        assert_eq!(msg.kind(), "tweet");
        let tw = msg.into_tweet().unwrap();
        assert_eq!(tw.geom_src(), Some(GeomSource::Coordinates));
        assert_eq!(tw.day(), "2012-04-01");
        assert_eq!(Tweet::from_row(&tw.to_row()).unwrap(), tw);
        assert_eq!(Tweet::from_dict(&tw.to_dict().unwrap()).unwrap(), tw);
    }

    #[test]
    fn it_should_pass_tweet_errors_through() {
        let err = classify(r#"{"text":"no id here"}"#).unwrap_err();
        assert!(err.is_error_of(FeedError::InvalidTweet));
    }
}
