use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use payment_intents::application::controller::{ControllerConfig, PaymentController};
use payment_intents::domain::ports::RecordStoreBox;
use payment_intents::domain::record::{CreatePayment, PaymentRecord};
use payment_intents::infrastructure::in_memory::InMemoryRecordStore;
use payment_intents::infrastructure::sandbox::SandboxProcessor;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the persistent record database. Required for every command
    /// except `demo`.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a full create -> confirm -> get lifecycle in-process.
    Demo {
        #[arg(long, default_value_t = 1000)]
        amount: i64,
        #[arg(long, default_value = "u1")]
        user_id: String,
        #[arg(long, default_value = "p1")]
        package_id: String,
    },
    /// Create a payment intent.
    Create {
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        package_id: String,
    },
    /// Confirm an in-progress payment intent.
    Confirm { id: String },
    /// Cancel an in-progress payment intent.
    Cancel { id: String },
    /// Show a payment record.
    Get { id: String },
}

fn open_store(db_path: Option<PathBuf>) -> Result<RecordStoreBox> {
    let path = db_path.ok_or_else(|| miette!("--db-path is required for this command"))?;

    #[cfg(feature = "storage-rocksdb")]
    {
        let store = payment_intents::infrastructure::rocksdb::RocksDbRecordStore::open(path)
            .into_diagnostic()?;
        Ok(Box::new(store))
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    {
        let _ = path;
        Err(miette!(
            "built without the storage-rocksdb feature; only `demo` is available"
        ))
    }
}

fn print_record(record: &PaymentRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Demo {
            amount,
            user_id,
            package_id,
        } => {
            let controller = PaymentController::new(
                Box::new(InMemoryRecordStore::new()),
                Box::new(SandboxProcessor::new()),
                ControllerConfig::default(),
            );

            let created = controller
                .create(CreatePayment {
                    amount,
                    user_id,
                    package_id,
                })
                .await
                .into_diagnostic()?;
            print_record(&created)?;

            let confirmed = controller.confirm(&created.id).await.into_diagnostic()?;
            print_record(&confirmed)?;

            let fetched = controller.get(&created.id).await.into_diagnostic()?;
            print_record(&fetched)?;
        }
        command => {
            let store = open_store(cli.db_path)?;
            // Sandbox processor state does not persist across invocations,
            // so accept any intent id the store knows about.
            let controller = PaymentController::new(
                store,
                Box::new(SandboxProcessor::permissive()),
                ControllerConfig::default(),
            );

            let record = match command {
                Command::Create {
                    amount,
                    user_id,
                    package_id,
                } => controller
                    .create(CreatePayment {
                        amount,
                        user_id,
                        package_id,
                    })
                    .await
                    .into_diagnostic()?,
                Command::Confirm { id } => controller.confirm(&id).await.into_diagnostic()?,
                Command::Cancel { id } => controller.cancel(&id).await.into_diagnostic()?,
                Command::Get { id } => controller.get(&id).await.into_diagnostic()?,
                Command::Demo { .. } => unreachable!(),
            };
            print_record(&record)?;
        }
    }

    Ok(())
}
