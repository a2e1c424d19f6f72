use crate::domain::interface::*;
use crate::domain::model::Row;
use crate::error::*;
use std::io::{BufRead, Write};

const DELIMITER: char = '\t';

/// Tab-separated rows, one per line. An empty cell is an absent value.
pub struct TsvReader<R> {
    input: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> TsvReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            line_number: 0,
        }
    }

    /// 1-based number of the line most recently read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> IRowReader for TsvReader<R> {
    fn read_row(&mut self) -> Option<Result<Row>> {
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => self.line_number += 1,
                Err(err) => return Some(Err(err.into())),
            }
            let line = self.line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(DELIMITER)
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            return Some(Ok(row));
        }
    }
}

pub struct TsvWriter<W> {
    output: W,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> IRowWriter for TsvWriter<W> {
    fn write_row(&mut self, row: &[Option<String>]) -> Result<()> {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push(DELIMITER);
            }
            if let Some(cell) = cell {
                if cell.contains([DELIMITER, '\n', '\r']) {
                    return Err(FormatError::new(
                        RowError::InvalidCell,
                        anyhow::anyhow!("column {} contains a tab or line break", i),
                    ));
                }
                line.push_str(cell);
            }
        }
        line.push('\n');
        self.output.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::*;
    use crate::domain::model::Tweet;
    use crate::repository::{TweetReader, TweetWriter};

    #[test]
    fn it_should_map_empty_cells_to_absent() {
        let mut reader = TsvReader::new("1\t\tx\r\n\n2\n".as_bytes());
        assert_eq!(
            reader.read_row().unwrap().unwrap(),
            vec![Some("1".to_string()), None, Some("x".to_string())]
        );
        assert_eq!(reader.line_number(), 1);
        assert_eq!(
            reader.read_row().unwrap().unwrap(),
            vec![Some("2".to_string())]
        );
        assert_eq!(reader.line_number(), 3);
        assert!(reader.read_row().is_none());
    }

    #[test]
    fn it_should_write_absent_as_empty() {
        let mut writer = TsvWriter::new(Vec::new());
        writer
            .write_row(&[Some("a".to_string()), None, Some("b c".to_string())])
            .unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), b"a\t\tb c\n");
    }

    #[test]
    fn it_should_refuse_cells_that_break_the_format() {
        let mut writer = TsvWriter::new(Vec::new());
        let err = writer
            .write_row(&[Some("a\tb".to_string())])
            .unwrap_err();
        assert!(err.is_error_of(RowError::InvalidCell));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn it_should_round_trip_tweets_through_tsv() {
        let tweets = vec![
            Tweet::from_json(&serde_json::from_str(T_TW_JSON_CO).unwrap()).unwrap(),
            Tweet::from_dict(&simple_dict()).unwrap(),
        ];
        let mut writer = TweetWriter::new(TsvWriter::new(Vec::new()));
        writer.write_tweets(&tweets).unwrap();
        let bytes = writer.into_inner().into_inner();

        let read: Vec<Tweet> = TweetReader::new(TsvReader::new(bytes.as_slice()))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(read, tweets);
    }
}
