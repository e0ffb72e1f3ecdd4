use std::path::PathBuf;

use clap::ValueHint;
use obj2bin_core::convert::{
    ConvertOptions, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_TRIANGLE_DUMP, DEFAULT_VERTEX_DUMP,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Convert an OBJ triangle mesh into the flat binary triangle format
#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,obj2bin=info,obj2bin_core=info",
        env = "OBJ2BIN_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    /// OBJ file to convert
    #[arg(default_value = DEFAULT_INPUT, value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// Binary mesh to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
    /// Where to dump the vertex table
    #[arg(long, default_value = DEFAULT_VERTEX_DUMP, value_hint = ValueHint::FilePath)]
    pub vertex_dump: PathBuf,
    /// Where to dump the triangle list
    #[arg(long, default_value = DEFAULT_TRIANGLE_DUMP, value_hint = ValueHint::FilePath)]
    pub triangle_dump: PathBuf,
    /// Skip writing the debug dumps
    #[arg(long)]
    pub no_dumps: bool,
}

impl Cli {
    pub fn convert_options(&self) -> ConvertOptions {
        let options = ConvertOptions::new(&self.input, &self.output);
        if self.no_dumps {
            options
        } else {
            options.with_dumps(&self.vertex_dump, &self.triangle_dump)
        }
    }
}

/// Set up log output on stderr
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
