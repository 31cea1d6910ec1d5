use clap::{App, AppSettings};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    scroogecoin_lib::logging::init()?;

    let matches = App::new("scroogecoin")
        .about("ScroogeCoin ledger tools.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(scroogecoin_lib::commands::inspect_command())
        .subcommand(scroogecoin_lib::commands::handle_command())
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("inspect") {
        scroogecoin_lib::commands::run_inspect_command(matches)
    } else if let Some(matches) = matches.subcommand_matches("handle") {
        scroogecoin_lib::commands::run_handle_command(matches)
    } else {
        Err("Unknown subcommand.".into())
    }
}
