use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use meal_client::{FoodishClient, MealSource};
use shared::{
    domain::{BillInputs, FriendCount, SplitMode},
    error::ErrorCategory,
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod repl;
mod session;

use commands::parse_order_arg;
use config::{load_settings, validate_meal_url};
use render::{render_bill, JsonReport};
use session::BillSession;

#[derive(Parser, Debug)]
#[command(name = "billsplit", about = "Split a restaurant bill between friends")]
struct Cli {
    #[arg(long, default_value = "billsplit.toml")]
    config: PathBuf,
    #[arg(long)]
    friends: Option<usize>,
    #[arg(long)]
    mode: Option<SplitMode>,
    #[arg(long)]
    meal_api_url: Option<String>,
    /// Skip the meal suggestion request.
    #[arg(long)]
    no_suggestion: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split one bill given on the command line and exit.
    Split {
        /// `<item>:<cost>:<friend#>`, repeatable.
        #[arg(long = "order", required = true)]
        orders: Vec<String>,
        #[arg(long, default_value = "0")]
        tip: String,
        #[arg(long, default_value = "0")]
        tax: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config);
    if let Some(friends) = cli.friends {
        settings.friends =
            FriendCount::new(friends).context("--friends must be at least 1")?;
    }
    if let Some(mode) = cli.mode {
        settings.split_mode = mode;
    }
    if let Some(url) = cli.meal_api_url {
        settings.meal_api_url = url;
    }

    let meal_source: Option<Box<dyn MealSource>> = if cli.no_suggestion {
        None
    } else {
        let url = validate_meal_url(&settings.meal_api_url)?;
        Some(Box::new(FoodishClient::new(url.as_str())))
    };
    info!(
        friends = settings.friends.get(),
        mode = %settings.split_mode,
        suggestions = meal_source.is_some(),
        "starting bill splitter"
    );

    let inputs = BillInputs {
        friends: settings.friends,
        mode: settings.split_mode,
        ..BillInputs::default()
    };
    let mut session = BillSession::new(inputs, meal_source);

    match cli.command {
        Some(Command::Split {
            orders,
            tip,
            tax,
            json,
        }) => run_once(&mut session, &orders, &tip, &tax, json).await,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            repl::run_interactive(&mut session, stdin, &mut io::stdout()).await
        }
    }
}

async fn run_once(
    session: &mut BillSession,
    orders: &[String],
    tip: &str,
    tax: &str,
    json: bool,
) -> Result<()> {
    session.set_tip(tip).context("invalid --tip")?;
    session.set_tax(tax).context("invalid --tax")?;
    for raw in orders {
        let (item, cost, person) = parse_order_arg(raw)?;
        session
            .add_order(&item, &cost, person)
            .with_context(|| format!("invalid --order '{raw}'"))?;
    }

    session.submit().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonReport::from_session(session))?
        );
    } else {
        print!("{}", render_bill(session));
    }

    if let Some(err) = session.error() {
        if err.category == ErrorCategory::Validation {
            bail!("{}", err.message);
        }
    }
    Ok(())
}
