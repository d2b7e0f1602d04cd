/// meshbuf-inspect - load a geometry file and report its GPU buffers
///
/// Usage: meshbuf-inspect model.obj [--config meshbuf.toml] [--json]

use anyhow::Result;
use clap::{Parser, ValueEnum};
use meshbuf_core::{AbsentAttributes, FaceArity, LoadOptions, WidthCheck};
use meshbuf_inspect::{Config, Inspector, Output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshbuf-inspect")]
#[command(about = "Convert a geometry file to interleaved buffers and report the layout")]
#[command(version)]
struct Cli {
    /// Geometry file (v/vt/vn/f text format)
    input: PathBuf,

    /// TOML config file with [loader] and [log] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reproduce the original tool's output, defects included
    #[arg(long)]
    reference: bool,

    /// Policy for faces that are not triangles
    #[arg(long, value_enum)]
    faces: Option<FacesArg>,

    /// Policy for corners without texture or normal indices
    #[arg(long, value_enum)]
    absent: Option<AbsentArg>,

    /// Whether mixed component counts fail the load
    #[arg(long, value_enum)]
    widths: Option<WidthsArg>,

    /// Stop feeding numbers to the previous directive after unknown tokens
    /// (already the default unless --reference is given)
    #[arg(long)]
    isolate_unknown: bool,

    /// Print a JSON dump including both buffers
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FacesArg {
    Flatten,
    Reject,
    Triangulate,
}

#[derive(Clone, Copy, ValueEnum)]
enum AbsentArg {
    Omit,
    ZeroFill,
}

#[derive(Clone, Copy, ValueEnum)]
enum WidthsArg {
    Ignore,
    Enforce,
}

impl Cli {
    fn load_options(&self, mut options: LoadOptions) -> LoadOptions {
        if self.reference {
            options = LoadOptions::reference();
        }
        if let Some(faces) = self.faces {
            options.face_arity = match faces {
                FacesArg::Flatten => FaceArity::Flatten,
                FacesArg::Reject => FaceArity::Reject,
                FacesArg::Triangulate => FaceArity::Triangulate,
            };
        }
        if let Some(absent) = self.absent {
            options.absent_attributes = match absent {
                AbsentArg::Omit => AbsentAttributes::Omit,
                AbsentArg::ZeroFill => AbsentAttributes::ZeroFill,
            };
        }
        if let Some(widths) = self.widths {
            options.widths = match widths {
                WidthsArg::Ignore => WidthCheck::Ignore,
                WidthsArg::Enforce => WidthCheck::Enforce,
            };
        }
        if self.isolate_unknown {
            options.isolate_unknown_directives = true;
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Initialize logging; stdout is reserved for the report
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = cli.load_options(config.loader.clone());
    let output = if cli.json { Output::Json } else { Output::Text };

    let stdout = std::io::stdout();
    Inspector::new(options, output).run(&cli.input, &mut stdout.lock())?;
    Ok(())
}
