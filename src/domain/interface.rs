use crate::domain::model::*;
use crate::error::Result;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Splits field values into tokens. The splitting rules are the implementor's.
pub trait ITokenizer {
    /// Tokenize every value in `sources`, tagging each token with the alias of
    /// the field it came from.
    fn tokenize_all(&self, sources: &IndexMap<FieldAlias, Cow<'_, str>>)
        -> Vec<(FieldAlias, String)>;
}

/// Source of flat-file rows, e.g. a TSV file.
pub trait IRowReader {
    /// The next row, or `None` at end of input.
    fn read_row(&mut self) -> Option<Result<Row>>;
}

/// Sink for flat-file rows.
pub trait IRowWriter {
    fn write_row(&mut self, row: &[Option<String>]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}
