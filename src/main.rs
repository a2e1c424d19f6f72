use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use std::io::{self, BufWriter};
use tracing::info;
use tweetfmt::domain::model::tokens::parse_field_list;
use tweetfmt::infra::{TsvReader, TsvWriter};
use tweetfmt::initializer;
use tweetfmt::repository::{TweetReader, TweetWriter};

/// Convert streaming-API tweets to TSV rows and tokenize them.
#[derive(Parser)]
#[command(name = "tweetfmt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Options {
    /// Stop at the first bad record instead of skipping it.
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read feed messages (one JSON object per line) from stdin and write
    /// tweets as TSV rows to stdout.
    Convert,

    /// Read TSV rows from stdin and print each tweet id followed by its tokens.
    Tokenize(TokenizeArgs),
}

#[derive(Args)]
struct TokenizeArgs {
    /// Comma-separated field aliases: tx, ds, ln, lo, tz.
    #[arg(long)]
    fields: Option<String>,

    /// Drop the field prefix from tokens.
    #[arg(long)]
    unify: bool,

    /// Shortest token to keep, in characters.
    #[arg(long)]
    min_token_len: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // stdout carries data, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = initializer::Config::from_env()?;
    config.strict |= cli.options.strict;
    if let Commands::Tokenize(args) = &cli.command {
        if let Some(fields) = &args.fields {
            config.fields = parse_field_list(fields)?;
        }
        config.unify |= args.unify;
        if let Some(min_len) = args.min_token_len {
            config.min_token_len = min_len;
        }
    }

    let app = initializer::new(config);
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let summary = match cli.command {
        Commands::Convert => {
            let mut writer = TweetWriter::new(TsvWriter::new(stdout));
            app.services.tweet.convert_feed(stdin, &mut writer)?
        }
        Commands::Tokenize(_) => {
            let reader = TweetReader::new(TsvReader::new(stdin));
            app.services.tweet.tokenize_rows(reader, stdout)?
        }
    };

    info!(
        tweets = summary.tweets,
        notices = ?summary.notices,
        blank = summary.blank,
        skipped = summary.skipped,
        "done"
    );
    Ok(())
}
