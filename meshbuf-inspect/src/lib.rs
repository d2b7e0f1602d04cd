/// Command-line inspector for geometry files
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use meshbuf_core::{GeometryLoader, LoadOptions};

pub mod config;
pub mod report;

pub use config::Config;
pub use report::{Dump, Summary};

/// Output format of an inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

/// Loads one file and writes its report
pub struct Inspector {
    loader: GeometryLoader,
    output: Output,
}

impl Inspector {
    pub fn new(options: LoadOptions, output: Output) -> Self {
        Self {
            loader: GeometryLoader::new(options),
            output,
        }
    }

    pub fn run<W: Write>(&self, input: &Path, writer: &mut W) -> Result<()> {
        tracing::info!("Loading {:?}", input);
        let mesh = self
            .loader
            .load_file(input)
            .with_context(|| format!("Failed to load geometry: {:?}", input))?;

        tracing::info!(
            "Loaded {} records, stride={}",
            mesh.record_count(),
            mesh.layout.stride
        );

        match self.output {
            Output::Text => Summary::new(&mesh).write_text(writer)?,
            Output::Json => {
                serde_json::to_writer_pretty(&mut *writer, &Dump::new(&mesh))?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
