use crate::domain::interface::*;
use crate::domain::model::*;
use crate::domain::service::envelope::{classify_bytes, FeedMessage};
use crate::error::*;
use crate::repository::{TweetReader, TweetWriter};
use serde::*;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TweetService {
    tokenizer: Arc<dyn ITokenizer + Send + Sync>,
    fields: Vec<FieldAlias>,
    unify: bool,
    strict: bool,
}

/// What happened to each input record.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub tweets: usize,
    pub notices: BTreeMap<&'static str, usize>,
    pub blank: usize,
    pub skipped: usize,
}

impl TweetService {
    pub fn new(
        tokenizer: Arc<dyn ITokenizer + Send + Sync>,
        fields: Vec<FieldAlias>,
        unify: bool,
        strict: bool,
    ) -> Self {
        Self {
            tokenizer,
            fields,
            unify,
            strict,
        }
    }

    /// Classify each feed line and write the tweets among them as rows.
    pub fn convert_feed<R, W>(&self, mut input: R, writer: &mut TweetWriter<W>) -> Result<Summary>
    where
        R: BufRead,
        W: IRowWriter,
    {
        let mut summary = Summary::default();
        let mut line = Vec::new();
        let mut line_number = 0;
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;
            match classify_bytes(&line) {
                Ok(FeedMessage::Tweet(tw)) => {
                    writer.write_tweet(&tw)?;
                    summary.tweets += 1;
                }
                Ok(notice) => {
                    debug!(line = line_number, kind = notice.kind(), "ignoring notice");
                    *summary.notices.entry(notice.kind()).or_default() += 1;
                }
                Err(err) if err.is_error_of(FeedError::EmptyInput) => summary.blank += 1,
                Err(err) => self.skip_or_abort(err, line_number, &mut summary)?,
            }
        }
        writer.flush()?;
        Ok(summary)
    }

    /// Tokenize every tweet in `reader`, writing one line per tweet: the id,
    /// then its tokens, tab-separated.
    pub fn tokenize_rows<R, W>(&self, reader: TweetReader<R>, mut output: W) -> Result<Summary>
    where
        R: IRowReader,
        W: Write,
    {
        let mut summary = Summary::default();
        for (index, tw) in reader.enumerate() {
            let mut tw = match tw {
                Ok(tw) => tw,
                Err(err) => {
                    self.skip_or_abort(err, index + 1, &mut summary)?;
                    continue;
                }
            };
            let mut line = tw.id().to_string();
            for token in self.tokenize(&mut tw) {
                line.push('\t');
                line.push_str(token);
            }
            writeln!(output, "{}", line)?;
            summary.tweets += 1;
        }
        output.flush()?;
        Ok(summary)
    }

    pub fn tokenize<'a>(&self, tw: &'a mut Tweet) -> &'a [String] {
        tw.tokenize(self.tokenizer.as_ref(), &self.fields, self.unify)
    }

    fn skip_or_abort(&self, err: FormatError, record: usize, summary: &mut Summary) -> Result<()> {
        if self.strict || err.disposition() == Disposition::Abort {
            return Err(err);
        }
        warn!(record, error = %err.to_log_line(), "skipping record");
        summary.skipped += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::*;
    use crate::domain::service::WhitespaceTokenizer;
    use crate::infra::{TsvReader, TsvWriter};

    fn service(strict: bool) -> TweetService {
        TweetService::new(
            Arc::new(WhitespaceTokenizer::new(1)),
            vec![FieldAlias::Tx, FieldAlias::Tz],
            false,
            strict,
        )
    }

    fn feed() -> String {
        [
            T_TW_JSON_CO,
            "",
            T_DELETE_JSON,
            "{not json",
            T_SCRUB_GEO_JSON,
            r#"{"foo":1}"#,
            T_WITHHELD_JSON,
        ]
        .join("\n")
    }

    #[test]
    fn it_should_convert_and_count() {
        let mut writer = TweetWriter::new(TsvWriter::new(Vec::new()));
        let summary = service(false)
            .convert_feed(feed().as_bytes(), &mut writer)
            .unwrap();

        assert_eq!(summary.tweets, 1);
        assert_eq!(summary.blank, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(
            summary.notices,
            BTreeMap::from([("delete", 1), ("scrub_geo", 1), ("status_withheld", 1)])
        );

        let out = String::from_utf8(writer.into_inner().into_inner()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("186339941163339776\t2012-04-01T06:31:18+00:00\t"));
        assert!(out.trim_end().ends_with("\t16.37778864\t48.24424304\tco"));
    }

    #[test]
    fn it_should_skip_binary_lines() {
        let mut feed = b"\xff\xfe garbage\n".to_vec();
        feed.extend_from_slice(T_TW_JSON_CO.as_bytes());
        feed.push(b'\n');

        let mut writer = TweetWriter::new(TsvWriter::new(Vec::new()));
        let summary = service(false)
            .convert_feed(feed.as_slice(), &mut writer)
            .unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.tweets, 1);

        let out = String::from_utf8(writer.into_inner().into_inner()).unwrap();
        assert!(out.starts_with("186339941163339776\t"));
    }

    #[test]
    fn it_should_stop_on_first_bad_record_when_strict() {
        let mut writer = TweetWriter::new(TsvWriter::new(Vec::new()));
        let err = service(true)
            .convert_feed(feed().as_bytes(), &mut writer)
            .unwrap_err();
        assert!(err.is_error_of(FeedError::MalformedInput));
    }

    #[test]
    fn it_should_tokenize_rows() {
        let tw = Tweet::from_dict(&simple_dict()).unwrap();
        let mut writer = TweetWriter::new(TsvWriter::new(Vec::new()));
        writer.write_tweet(&tw).unwrap();
        let rows = writer.into_inner().into_inner();

        let mut output = Vec::new();
        let summary = service(false)
            .tokenize_rows(TweetReader::new(TsvReader::new(rows.as_slice())), &mut output)
            .unwrap();
        assert_eq!(summary.tweets, 1);
        assert_eq!(String::from_utf8(output).unwrap(), "-1\ttx a\ttx b\ttz g\n");
    }

    #[test]
    fn it_should_abort_on_damaged_rows() {
        let mut output = Vec::new();
        let err = service(false)
            .tokenize_rows(
                TweetReader::new(TsvReader::new("1\t2\n".as_bytes())),
                &mut output,
            )
            .unwrap_err();
        assert!(err.is_error_of(RowError::RowShape));
    }
}
