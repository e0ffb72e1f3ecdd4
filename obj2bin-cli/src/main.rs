/// obj2bin - convert an OBJ triangle mesh into the flat binary triangle format
///
/// With no arguments this reads `pg.obj`, dumps `v.txt` and `t.txt`, and
/// writes `resources/pg.bin`.
use anyhow::{Context, Result};
use clap::Parser;
use obj2bin_core::convert;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let options = cli.convert_options();
    let summary = convert(&options).with_context(|| {
        format!(
            "failed to convert {} into {}",
            options.input.display(),
            options.output.display()
        )
    })?;

    tracing::debug!(?summary, "done");
    Ok(())
}
