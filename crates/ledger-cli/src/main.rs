use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_core::{NodesRequest, Transaction};
use reqwest::Response;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "CLI client for the minimal ledger node")]
struct Cli {
    /// Node base URL (e.g. http://127.0.0.1:8000)
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    node: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mine a block from the pending transactions
    Mine,
    /// Print the node's full chain
    Chain,
    /// Submit a transaction
    Submit {
        /// Sender
        #[arg(long)]
        from: String,
        /// Recipient
        #[arg(long)]
        to: String,
        /// Amount
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Register peer nodes
    Register {
        /// Peer base URLs
        #[arg(required = true)]
        nodes: Vec<String>,
    },
    /// Ask the node to adopt the longest valid chain among its peers
    Resolve,
    /// Print the node identifier
    Uuid,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let cli = Cli::parse();
    let node = cli.node.trim_end_matches('/');
    let client = reqwest::Client::new();

    let res = match cli.cmd {
        Command::Mine => client.get(format!("{node}/mine")).send().await?,
        Command::Chain => client.get(format!("{node}/chain")).send().await?,
        Command::Submit { from, to, amount } => {
            let tx = Transaction::new(from, to, amount);
            client
                .post(format!("{node}/transactions/new"))
                .json(&tx)
                .send()
                .await?
        }
        Command::Register { nodes } => {
            client
                .post(format!("{node}/nodes/register"))
                .json(&NodesRequest { nodes })
                .send()
                .await?
        }
        Command::Resolve => client.get(format!("{node}/nodes/resolve")).send().await?,
        Command::Uuid => client.get(format!("{node}/getNodeUUID")).send().await?,
    };
    print_response(res).await
}

async fn print_response(res: Response) -> Result<()> {
    let status = res.status();
    let body = res.text().await?;
    debug!(%status, bytes = body.len(), "response received");
    println!("status: {}", status);
    // pretty-print JSON bodies, pass anything else through
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if body.is_empty() => {}
        Err(_) => println!("{body}"),
    }
    Ok(())
}
