/// obj2bin-view - preview a converted binary mesh in the terminal
///
/// Controls:
///   - Left/Right or A/D: Orbit around the mesh
///   - S: Toggle ground shadows
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use nalgebra::Point3;
use obj2bin_core::binary;
use obj2bin_terminal::{shadow, TerminalApp};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,obj2bin_view=info,obj2bin_core=info",
        env = "OBJ2BIN_LOG_FILTER"
    )]
    log_filter: String,
    /// Light position for ground shadows
    #[arg(long, value_parser = parse_point3::<f32>, value_name = "X,Y,Z")]
    light: Option<Point3<f32>>,
    /// Start with shadows hidden
    #[arg(long)]
    no_shadows: bool,
    /// Binary mesh to preview
    #[arg(default_value = "pg.bin", value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

fn parse_point3<R: FromStr + nalgebra::Scalar>(
    s: &str,
) -> Result<Point3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let parts: Vec<&str> = s.trim().split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got `{s}`").into());
    };
    Ok(Point3::new(
        R::from_str(x.trim())?,
        R::from_str(y.trim())?,
        R::from_str(z.trim())?,
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(cli.log_filter.as_str())
        .init();

    let mesh = binary::load(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    tracing::info!(path = %cli.input.display(), triangles = mesh.len(), "loaded mesh");

    let mut app = TerminalApp::new(mesh)
        .context("failed to query terminal size")?
        .with_light(cli.light.unwrap_or_else(shadow::default_light))
        .show_shadows(!cli.no_shadows);
    app.run().context("terminal preview failed")?;

    Ok(())
}
