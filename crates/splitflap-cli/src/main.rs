use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use splitflap_catalog::CatalogClient;
use splitflap_core::{FeedVariant, WorkshopsResponse};

#[derive(Debug, Parser)]
#[command(name = "splitflap-cli")]
#[command(about = "Preview the split-flap workshop feed")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the collection once and print the `/api/workshops` document.
    Schedule {
        /// Override `SPLITFLAP_FEED_VARIANT`.
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
        /// Treat this UTC day as today for the past-date cutoff.
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Graphql,
    Rest,
}

impl From<VariantArg> for FeedVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Graphql => FeedVariant::Graphql,
            VariantArg::Rest => FeedVariant::Rest,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Schedule {
            variant,
            today,
            pretty,
        }) => run_schedule(variant, today, pretty).await?,
        Some(Commands::Config) => {
            let config = splitflap_core::load_app_config()?;
            println!("{config:#?}");
        }
        None => println!("splitflap-cli: run with --help for commands"),
    }

    Ok(())
}

async fn run_schedule(
    variant: Option<VariantArg>,
    today: Option<NaiveDate>,
    pretty: bool,
) -> anyhow::Result<()> {
    let config = splitflap_core::load_app_config()?;
    let variant = variant.map_or(config.feed_variant, FeedVariant::from);
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let client = CatalogClient::from_config(&config)?;

    tracing::info!(%variant, %today, collection_id = %config.collection_id, "fetching schedule");
    let data =
        splitflap_catalog::list_workshops(&client, variant, &config.collection_id, today).await?;
    let response = WorkshopsResponse { data };

    let rendered = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{rendered}");
    Ok(())
}
