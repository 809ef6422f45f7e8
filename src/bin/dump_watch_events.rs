use std::path::PathBuf;

use clap::Parser;
use log::info;
use watch_wrapped::loader::load_history;
use watch_wrapped_utils::fs_json_util::{write_json, write_json_pretty};

#[derive(Parser)]
struct Opts {
    history_file: PathBuf,
    output_file: PathBuf,
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let table = load_history(&opts.history_file)?;
    if opts.pretty {
        write_json_pretty(&opts.output_file, &table)?;
    } else {
        write_json(&opts.output_file, &table)?;
    }
    info!(
        "Wrote {} watch events to {:?}.",
        table.len(),
        opts.output_file
    );
    Ok(())
}
