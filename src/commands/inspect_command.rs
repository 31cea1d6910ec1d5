use crate::commands::required_path;
use crate::{read_snapshot, TransactionOutput, Utxo, UtxoPool};
use clap::{App, Arg, ArgMatches};
use std::error::Error;
use std::path::PathBuf;

struct InspectCliOptions {
    ledger: PathBuf,
}

impl InspectCliOptions {
    pub fn parse(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            ledger: required_path(matches, "ledger")?,
        })
    }
}

pub fn inspect_command() -> App<'static> {
    App::new("inspect")
        .version("0.1")
        .about("Lists the unspent outputs in a ledger snapshot.")
        .arg(
            Arg::new("ledger")
                .short('l')
                .long("ledger")
                .value_name("FILE")
                .help("Ledger snapshot to read.")
                .takes_value(true)
                .required(true),
        )
}

/// Formats every unspent output as `<txid>:<index> -> <amount> <owner>`, ordered by id.
pub fn format_utxo_pool(pool: &UtxoPool) -> Vec<String> {
    let mut entries = pool.iter().collect::<Vec<(&Utxo, &TransactionOutput)>>();
    entries.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
    entries
        .into_iter()
        .map(|(utxo, output)| format!("{} -> {}", utxo, output))
        .collect()
}

pub fn run_inspect_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = InspectCliOptions::parse(matches)?;
    let pool = read_snapshot::<UtxoPool>(&options.ledger)?;
    for line in format_utxo_pool(&pool) {
        println!("{}", line);
    }
    match pool.total_value() {
        Some(total) => println!("Total: {} in {} outputs", total, pool.len()),
        None => println!("Total: overflow in {} outputs", pool.len()),
    }
    Ok(())
}
