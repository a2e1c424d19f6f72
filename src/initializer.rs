use crate::domain::interface::ITokenizer;
use crate::domain::model::tokens::parse_field_list;
use crate::domain::model::FieldAlias;
use crate::domain::service;
use crate::error::*;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub fields: Vec<FieldAlias>,
    pub unify: bool,
    pub min_token_len: usize,
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fields: FieldAlias::ALL.to_vec(),
            unify: false,
            min_token_len: 1,
            strict: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue,
}

impl IFormatError for ConfigError {
    fn error_type(&self) -> String {
        match self {
            ConfigError::InvalidValue => "invalid_config_value".to_string(),
        }
    }
}

impl Config {
    /// Read `TWEETFMT_*` variables; anything unset keeps its default.
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let mut config = Config::default();
        if let Some(fields) = lookup("TWEETFMT_FIELDS") {
            config.fields = parse_field_list(&fields)?;
        }
        if let Some(unify) = lookup("TWEETFMT_UNIFY") {
            config.unify = parse_flag("TWEETFMT_UNIFY", &unify)?;
        }
        if let Some(min_len) = lookup("TWEETFMT_MIN_TOKEN_LEN") {
            config.min_token_len = min_len.trim().parse().map_err(|err| {
                FormatError::new(
                    ConfigError::InvalidValue,
                    anyhow::Error::new(err).context("TWEETFMT_MIN_TOKEN_LEN"),
                )
            })?;
        }
        if let Some(strict) = lookup("TWEETFMT_STRICT") {
            config.strict = parse_flag("TWEETFMT_STRICT", &strict)?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(FormatError::new(
            ConfigError::InvalidValue,
            anyhow::anyhow!("{} must be a boolean, got {:?}", key, other),
        )),
    }
}

#[derive(Clone)]
pub struct Infras {
    pub tokenizer: Arc<dyn ITokenizer + Send + Sync>,
}

pub fn infras(config: &Config) -> Infras {
    let tokenizer = Arc::new(service::WhitespaceTokenizer::new(config.min_token_len));
    Infras { tokenizer }
}

#[derive(Clone)]
pub struct Services {
    pub tweet: service::TweetService,
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub infras: Infras,
    pub services: Services,
}

pub fn new(config: Config) -> AppContext {
    let infras = infras(&config);
    let services = Services {
        tweet: service::TweetService::new(
            infras.tokenizer.clone(),
            config.fields.clone(),
            config.unify,
            config.strict,
        ),
    };
    AppContext {
        config,
        infras,
        services,
    }
}
