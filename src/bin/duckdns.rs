//! duckdns-update - DuckDNS updater.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ddns_update::cli::DuckDnsArgs;
use ddns_update::{logging, Echo};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();
    let args = DuckDnsArgs::parse();

    if let Err(e) = args.run(Echo::stdout()).await {
        DuckDnsArgs::command()
            .error(ErrorKind::Io, e.to_string())
            .exit();
    }
}
