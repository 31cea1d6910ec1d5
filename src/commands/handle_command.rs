use crate::commands::required_path;
use crate::{read_snapshot, write_snapshot, EpochReport, Transaction, TxHandler, UtxoPool};
use clap::{App, Arg, ArgMatches};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

struct HandleCliOptions {
    ledger: PathBuf,
    batch: PathBuf,
    output: PathBuf,
}

impl HandleCliOptions {
    pub fn parse(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let ledger = required_path(matches, "ledger")?;
        // Without an explicit output the ledger snapshot is updated in place.
        let output = matches
            .value_of("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| ledger.clone());
        Ok(Self {
            ledger,
            batch: required_path(matches, "batch")?,
            output,
        })
    }
}

pub fn handle_command() -> App<'static> {
    App::new("handle")
        .version("0.1")
        .about("Processes one epoch: applies a batch of candidate transactions to a ledger.")
        .arg(
            Arg::new("ledger")
                .short('l')
                .long("ledger")
                .value_name("FILE")
                .help("Ledger snapshot holding the current unspent outputs.")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("batch")
                .short('b')
                .long("batch")
                .value_name("FILE")
                .help("Snapshot of the candidate transactions, in the order they are considered.")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the updated ledger. Defaults to overwriting the ledger.")
                .takes_value(true)
                .required(false),
        )
}

fn handle_epoch(options: &HandleCliOptions) -> Result<EpochReport, Box<dyn Error>> {
    let pool = read_snapshot::<UtxoPool>(&options.ledger)?;
    let batch = read_snapshot::<Vec<Transaction>>(&options.batch)?;
    info!(
        "Loaded {} unspent outputs and {} candidate transactions",
        pool.len(),
        batch.len()
    );

    let mut handler = TxHandler::new(&pool);
    let report = handler.handle_txs_with_report(&batch);
    write_snapshot(&options.output, handler.utxo_pool())?;
    info!("Wrote updated ledger to: {}", options.output.display());
    Ok(report)
}

pub fn run_handle_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = HandleCliOptions::parse(matches)?;
    let report = handle_epoch(&options)?;
    for transaction in &report.accepted {
        println!("accepted {}", transaction.id());
    }
    for rejection in &report.rejected {
        println!("rejected {}: {}", rejection.transaction_id, rejection.reason);
    }
    println!("Fees: {}", report.total_fees);
    Ok(())
}
