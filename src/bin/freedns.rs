//! freedns-update - FreeDNS Sync v2 updater.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ddns_update::cli::FreeDnsArgs;
use ddns_update::{logging, Echo, TokioPause};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();
    let args = FreeDnsArgs::parse();

    if let Err(e) = args.run(Echo::stdout(), &TokioPause).await {
        FreeDnsArgs::command()
            .error(ErrorKind::Io, e.to_string())
            .exit();
    }
}
