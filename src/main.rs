mod cli;
mod data;
mod error;
mod shell;
mod state;
mod stats;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use cli::Args;
use shell::Shell;
use state::Session;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.selection() {
        Some(selection) => {
            let session = Session::load(&args.data_dir, selection)
                .with_context(|| format!("loading {} trips", selection.city))?;
            let report = session.report();

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if args.json {
                serde_json::to_writer_pretty(&mut out, &report).context("serializing report")?;
                writeln!(out)?;
            } else {
                report.render_text(&mut out).context("writing statistics")?;
            }
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            Shell::new(stdin.lock(), io::stdout(), args.data_dir).run()
        }
    }
}
