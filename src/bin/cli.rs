use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use opera_explorer::{
    aggregator::{transaction_row, TransactionRow},
    config::{load_config, Config},
    convert::{fixed_precision, format_hash, integer_to_hex, time_ago, timestamp_to_date},
    links,
    pagination::{LoadOutcome, PaginationStatus},
    traits::TransactionProvider,
    types::TokenStandard,
    views::{AddressView, BlockView, LoadState, TabKind},
    Client,
};

/// Command line browser for the Opera explorer API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML config file; environment variables are used when omitted
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Network to query (mainnet, testnet or a GraphQL endpoint URL)
    #[arg(long, short)]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show an address with its balances and one tab of its history
    Address {
        address: String,

        /// Number of pages to load on the selected tab
        #[arg(long, short, default_value = "1")]
        pages: u32,

        /// Tab to list (transactions, erc20, erc721, erc1155)
        #[arg(long, short, default_value = "transactions", value_parser = parse_tab)]
        tab: TabKind,
    },
    /// Show a block and its transactions
    Block { number: u64 },
    /// Show a transaction
    Tx { hash: String },
}

fn parse_tab(value: &str) -> std::result::Result<TabKind, String> {
    match value.to_ascii_lowercase().as_str() {
        "transactions" | "txs" => Ok(TabKind::Transactions),
        other => other.parse::<TokenStandard>().map(TabKind::from),
    }
}

fn config_from_args(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::from_env()?,
    };
    if let Some(network) = &args.network {
        config.network = network.clone();
        config.validate()?;
    }
    Ok(config)
}

fn print_transactions(rows: &[TransactionRow]) {
    let now = Utc::now();
    for row in rows {
        let age = row.timestamp.map(|ts| time_ago(ts, now)).unwrap_or_else(|| "pending".into());
        println!(
            "  {}  {:>12}  {} -> {}  {} FTM",
            format_hash(&row.hash),
            age,
            format_hash(&row.from),
            row.to.as_deref().map(format_hash).unwrap_or_else(|| "contract creation".into()),
            fixed_precision(&row.value, 4),
        );
    }
}

async fn show_address(
    client: Arc<Client>,
    config: &Config,
    address: String,
    pages: u32,
    tab: TabKind,
) -> Result<()> {
    let mut view = AddressView::from_config(address, client, config);
    view.load().await;
    if view.account().loaded().is_some() && view.rate().is_unavailable() {
        tracing::info!("Retrying price feed");
        view.reload_price().await;
    }

    let summary = match view.account() {
        LoadState::Unavailable(reason) => anyhow::bail!("Account unavailable: {reason}"),
        _ => view.summary().context("Account was not loaded")?,
    };

    println!("Address   {}  ({})", summary.address, view.path());
    if let Some(name) = &summary.contract_name {
        println!("Contract  {name}");
    }
    println!("Balance   {} FTM", fixed_precision(&summary.balance, 4));
    println!("Available {} FTM", fixed_precision(&summary.available, 4));
    match (&summary.fiat_value, view.rate()) {
        (Some(value), _) => println!("Value     ${}", fixed_precision(value, 2)),
        (None, LoadState::Unavailable(reason)) => println!("Value     unavailable ({reason})"),
        (None, _) => println!("Value     -"),
    }
    println!("Delegated {} FTM", fixed_precision(&summary.delegations.delegated, 4));
    println!("Pending   {} FTM", fixed_precision(&summary.delegations.pending_rewards, 4));
    println!("Claimed   {} FTM", fixed_precision(&summary.delegations.claimed_rewards, 4));
    println!();

    view.open_tab(tab).await?;
    for _ in 1..pages {
        match view.load_more().await? {
            LoadOutcome::Appended(received) => tracing::debug!(received, "Loaded page"),
            outcome => {
                tracing::info!(?outcome, "No further pages");
                break;
            }
        }
    }

    println!("{} ({})", tab, view.tab_count(tab));
    match tab.standard() {
        None => print_transactions(&view.transaction_rows()),
        Some(standard) => {
            for row in view.token_rows(standard) {
                let amount = row
                    .amount
                    .as_ref()
                    .map(|amount| fixed_precision(amount, 4))
                    .or_else(|| row.token_id.as_ref().map(|id| format!("#{id}")))
                    .unwrap_or_default();
                println!(
                    "  {}  {} -> {}  {} {}",
                    format_hash(&row.hash),
                    format_hash(&row.sender),
                    format_hash(&row.recipient),
                    amount,
                    row.token_symbol.as_deref().unwrap_or(&row.token_address),
                );
            }
        }
    }
    let list = view.list(tab);
    if list.can_load_more() {
        println!("  ... more available, rerun with --pages {}", pages + 1);
    } else if list.status() == PaginationStatus::Stalled {
        println!("  ... the API reported more entries but returned none, list ends here");
    }
    Ok(())
}

async fn show_block(client: Arc<Client>, number: u64) -> Result<()> {
    let mut view = BlockView::new(number, client);
    view.load().await;

    if let LoadState::Unavailable(reason) = view.block() {
        anyhow::bail!("Block {number} unavailable: {reason}");
    }
    let summary = view.summary().context("Block was not loaded")?;

    println!("Block     {} ({})  {}", summary.number, integer_to_hex(summary.number), view.path());
    println!("Hash      {}", summary.hash);
    if let Some(parent) = &summary.parent_hash {
        println!("Parent    {parent}");
    }
    println!(
        "Time      {} ({})",
        timestamp_to_date(summary.timestamp).unwrap_or_default(),
        time_ago(summary.timestamp, Utc::now())
    );
    println!("Txs       {}", summary.transaction_count);
    print_transactions(&summary.transactions);

    let previous = view.previous().map(links::block_path).unwrap_or_else(|| "-".into());
    println!("Previous  {previous}");
    println!("Next      {}", links::block_path(view.next()));
    Ok(())
}

async fn show_transaction(client: Arc<Client>, hash: &str) -> Result<()> {
    let tx = client
        .get_transaction(hash)
        .await
        .with_context(|| format!("Failed to fetch transaction {hash}"))?;
    let row = transaction_row(&tx);

    println!("Tx        {}  ({})", row.hash, links::transaction_path(&row.hash));
    match row.block_number {
        Some(number) => println!("Block     {number}  ({})", links::block_path(number)),
        None => println!("Block     pending"),
    }
    if let Some(date) = row.timestamp.and_then(timestamp_to_date) {
        println!("Time      {date}");
    }
    println!("From      {}", row.from);
    println!("To        {}", row.to.as_deref().unwrap_or("contract creation"));
    println!("Value     {} FTM", fixed_precision(&row.value, 4));
    println!("Gas used  {}", row.gas_used);
    for transfer in &tx.token_transactions {
        println!(
            "  token {} {} {}",
            transfer.kind.as_deref().unwrap_or("TRANSFER"),
            transfer.token_symbol.as_deref().unwrap_or(&transfer.token_address),
            transfer.token_id,
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let config = config_from_args(&args)?;
    let client = Arc::new(Client::from_config(&config).context("Failed to build API client")?);
    tracing::info!(api = client.api_url(), network = %config.network, "Querying explorer API");

    match args.command {
        Command::Address { address, pages, tab } => {
            show_address(client, &config, address, pages.max(1), tab).await
        }
        Command::Block { number } => show_block(client, number).await,
        Command::Tx { hash } => show_transaction(client, &hash).await,
    }
}
