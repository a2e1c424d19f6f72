use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;

/// Reads tweets from any row source.
pub struct TweetReader<R> {
    rows: R,
}

impl<R: IRowReader> TweetReader<R> {
    pub fn new(rows: R) -> Self {
        Self { rows }
    }

    pub fn get_ref(&self) -> &R {
        &self.rows
    }

    pub fn into_inner(self) -> R {
        self.rows
    }
}

impl<R: IRowReader> Iterator for TweetReader<R> {
    type Item = Result<Tweet>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.read_row()?;
        Some(row.and_then(|row| Tweet::from_row(&row)))
    }
}

/// Writes tweets to any row sink.
pub struct TweetWriter<W> {
    rows: W,
}

impl<W: IRowWriter> TweetWriter<W> {
    pub fn new(rows: W) -> Self {
        Self { rows }
    }

    pub fn write_tweet(&mut self, tweet: &Tweet) -> Result<()> {
        self.rows.write_row(&tweet.to_row())
    }

    pub fn write_tweets<'a>(&mut self, tweets: impl IntoIterator<Item = &'a Tweet>) -> Result<()> {
        for tweet in tweets {
            self.write_tweet(tweet)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.rows.flush()
    }

    pub fn into_inner(self) -> W {
        self.rows
    }
}
