use crate::domain::interface::ITokenizer;
use crate::domain::model::text::strip_non_alphanumerics;
use crate::domain::model::Tweet;
use crate::error::*;
use indexmap::IndexMap;
use std::borrow::Cow;

#[derive(Debug)]
pub enum TokenFieldError {
    UnknownAlias,
}

impl IFormatError for TokenFieldError {
    fn error_type(&self) -> String {
        match self {
            TokenFieldError::UnknownAlias => "unknown_field_alias".to_string(),
        }
    }
}

/// Short names for the tokenizable fields.
///
/// Token databases repeat the field name on every token, so these are kept to
/// two letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldAlias {
    /// text
    Tx,
    /// user description
    Ds,
    /// user language
    Ln,
    /// user location
    Lo,
    /// user time zone, squashed to one token
    Tz,
}

type FieldAccessor = for<'a> fn(&'a Tweet) -> Option<Cow<'a, str>>;

fn text_of(tw: &Tweet) -> Option<Cow<'_, str>> {
    tw.text().map(Cow::Borrowed)
}

fn description_of(tw: &Tweet) -> Option<Cow<'_, str>> {
    tw.user_description().map(Cow::Borrowed)
}

fn lang_of(tw: &Tweet) -> Option<Cow<'_, str>> {
    tw.user_lang().map(Cow::Borrowed)
}

fn location_of(tw: &Tweet) -> Option<Cow<'_, str>> {
    tw.user_location().map(Cow::Borrowed)
}

fn time_zone_of(tw: &Tweet) -> Option<Cow<'_, str>> {
    tw.user_time_zone()
        .map(strip_non_alphanumerics)
        .filter(|tz| !tz.is_empty())
        .map(Cow::Owned)
}

const FIELD_TABLE: [(FieldAlias, &str, FieldAccessor); 5] = [
    (FieldAlias::Tx, "tx", text_of),
    (FieldAlias::Ds, "ds", description_of),
    (FieldAlias::Ln, "ln", lang_of),
    (FieldAlias::Lo, "lo", location_of),
    (FieldAlias::Tz, "tz", time_zone_of),
];

impl FieldAlias {
    pub const ALL: [FieldAlias; 5] = [
        FieldAlias::Tx,
        FieldAlias::Ds,
        FieldAlias::Ln,
        FieldAlias::Lo,
        FieldAlias::Tz,
    ];

    fn entry(self) -> &'static (FieldAlias, &'static str, FieldAccessor) {
        &FIELD_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.entry().1
    }

    /// The field's value as the tokenizer should see it.
    pub fn value_of(self, tw: &Tweet) -> Option<Cow<'_, str>> {
        (self.entry().2)(tw)
    }
}

impl std::fmt::Display for FieldAlias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldAlias {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        FIELD_TABLE
            .iter()
            .find(|(_, name, _)| *name == s.trim())
            .map(|(alias, _, _)| *alias)
            .ok_or_else(|| {
                FormatError::new(
                    TokenFieldError::UnknownAlias,
                    anyhow::anyhow!("unknown field alias {:?}", s),
                )
            })
    }
}

/// Parse a comma-separated alias list such as `tx,ds,tz`.
pub fn parse_field_list(s: &str) -> Result<Vec<FieldAlias>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Run `tker` over the chosen fields of `tw`.
///
/// Absent fields are not passed to the tokenizer. Without `unify`, every token
/// is prefixed with its field alias and a space (`"tx hello"`), so equal words
/// from different fields stay distinct.
pub fn tokenize_fields<T>(tw: &Tweet, tker: &T, fields: &[FieldAlias], unify: bool) -> Vec<String>
where
    T: ITokenizer + ?Sized,
{
    let sources: IndexMap<FieldAlias, Cow<'_, str>> = fields
        .iter()
        .filter_map(|alias| alias.value_of(tw).map(|value| (*alias, value)))
        .collect();
    tker.tokenize_all(&sources)
        .into_iter()
        .map(|(alias, token)| {
            if unify {
                token
            } else {
                format!("{} {}", alias, token)
            }
        })
        .collect()
}
