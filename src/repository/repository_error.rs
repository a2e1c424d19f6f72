use crate::error::*;

#[derive(Debug)]
pub enum RowError {
    RowShape,
    InvalidCell,
}

impl IFormatError for RowError {
    fn error_type(&self) -> String {
        use RowError::*;

        match self {
            RowShape => "row_shape",
            InvalidCell => "invalid_cell",
        }
        .to_string()
    }

    fn disposition(&self) -> Disposition {
        use RowError::*;

        // a short or long row means the file itself is damaged
        match self {
            RowShape => Disposition::Abort,
            InvalidCell => Disposition::SkipRecord,
        }
    }
}
