use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payproxy::application::proxy::PaymentProxy;
use payproxy::domain::client::Client;
use payproxy::domain::ports::{ClientStoreBox, TransactionStoreBox};
use payproxy::infrastructure::in_memory::{
    InMemoryClientStore, InMemoryTransactionStore, InMemoryWebhookQueue,
};
use payproxy::infrastructure::providers::{StripeProvider, VisaProvider};
use payproxy::interfaces::json::report_writer::ReportWriter;
use payproxy::interfaces::json::request_reader::RequestReader;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payment submissions, one JSON object per line
    input: PathBuf,

    /// JSON file with an array of clients to seed the credential store.
    /// Without it a demo client (client-123 / secret-abc) is seeded.
    #[arg(long)]
    clients: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Upper bound on a single provider call, in milliseconds
    #[arg(long, default_value_t = 5000)]
    provider_timeout_ms: u64,
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

    let (clients, transactions) = open_stores(cli.db_path)?;
    seed_clients(&clients, cli.clients.as_deref()).await?;

    let proxy = PaymentProxy::new(
        clients,
        transactions,
        Box::new(InMemoryWebhookQueue::new()),
        Box::new(StripeProvider::new()),
        Box::new(VisaProvider::new()),
    )
    .with_provider_timeout(Duration::from_millis(cli.provider_timeout_ms));

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());

    for submission in reader.submissions() {
        match submission {
            Ok(submission) => {
                let credentials = submission.credentials();
                // Business failures come back as responses; an Err here is a
                // storage failure and aborts the run.
                let response = proxy
                    .process(submission.request, &credentials)
                    .await
                    .into_diagnostic()?;
                writer.write_response(&response).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading submission: {e}");
            }
        }
    }

    let transactions = proxy.transactions().await.into_diagnostic()?;
    let events = proxy.webhook_events().await.into_diagnostic()?;
    writer.write_audit(&transactions, &events).into_diagnostic()?;

    Ok(())
}

#[allow(unused_variables)]
fn open_stores(db_path: Option<PathBuf>) -> Result<(ClientStoreBox, TransactionStoreBox)> {
    match db_path {
        Some(db_path) => {
            #[cfg(feature = "storage-rocksdb")]
            {
                let store =
                    payproxy::infrastructure::rocksdb::RocksDbStore::open(db_path).into_diagnostic()?;
                Ok((Box::new(store.clone()), Box::new(store)))
            }
            #[cfg(not(feature = "storage-rocksdb"))]
            {
                eprintln!(
                    "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
                );
                Ok((
                    Box::new(InMemoryClientStore::new()),
                    Box::new(InMemoryTransactionStore::new()),
                ))
            }
        }
        None => Ok((
            Box::new(InMemoryClientStore::new()),
            Box::new(InMemoryTransactionStore::new()),
        )),
    }
}

async fn seed_clients(clients: &ClientStoreBox, path: Option<&std::path::Path>) -> Result<()> {
    let seed = match path {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            serde_json::from_reader::<_, Vec<Client>>(file).into_diagnostic()?
        }
        None => vec![Client {
            client_id: "client-123".to_string(),
            client_secret: "secret-abc".to_string(),
            name: "Demo Client".to_string(),
            active: true,
        }],
    };

    for client in seed {
        clients.insert(client).await.into_diagnostic()?;
    }
    Ok(())
}
