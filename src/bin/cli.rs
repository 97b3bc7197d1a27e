// src/bin/cli.rs
use clap::Parser;

use uhl_ops::cli::{self, Cli};
use uhl_ops::logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let cfg = args.config();
    logging::init(&cfg.log_file, cli::log_level(&cfg))?;

    match cli::run(&cfg, args.command.operation()) {
        Ok(_) => Ok(()),
        Err(e) if e.is_fatal() => {
            uhl_ops::loge!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
