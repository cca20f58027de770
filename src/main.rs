use clap::{App, AppSettings};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let matches = App::new("clearcoin")
        .about("ClearCoin ledger CLI tools.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(clearcoin_lib::commands::simulate_command())
        .get_matches();

    if let Some(ref matches) = matches.subcommand_matches("simulate") {
        clearcoin_lib::commands::run_simulate_command(&matches)
    } else {
        panic!("Should report help.");
    }
}
