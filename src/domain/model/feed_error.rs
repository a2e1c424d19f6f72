use crate::error::*;

#[derive(Debug)]
pub enum FeedError {
    EmptyInput,
    MalformedInput,
    UnrecognizedVariant,
    InvalidTweet,
}

impl IFormatError for FeedError {
    fn error_type(&self) -> String {
        use FeedError::*;

        match self {
            EmptyInput => "empty_input",
            MalformedInput => "malformed_input",
            UnrecognizedVariant => "unrecognized_variant",
            InvalidTweet => "invalid_tweet",
        }
        .to_string()
    }

    fn disposition(&self) -> Disposition {
        Disposition::SkipRecord
    }

    // parser messages can quote the offending line
    fn redacted(&self) -> bool {
        matches!(self, FeedError::MalformedInput)
    }
}
