use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Default, Eq, Hash, PartialOrd, Ord)]
pub struct TweetID(pub i64);

derive_newtype_serde!(TweetID, i64);

// TweetID to i64
impl From<TweetID> for i64 {
    fn from(tweet_id: TweetID) -> Self {
        tweet_id.0
    }
}

// i64 to TweetID
impl From<i64> for TweetID {
    fn from(tweet_id: i64) -> Self {
        TweetID(tweet_id)
    }
}

impl std::fmt::Display for TweetID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TweetID {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(TweetID)
    }
}
