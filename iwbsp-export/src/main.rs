mod config;
mod info;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use common::prelude::*;
use iwbsp::prelude::*;

/// Rebuilds an editable .map from a compiled IBSP v4 level.
#[derive(Parser, Debug)]
#[command(name = "iwbsp-export", version)]
struct Cli {
    /// Compiled level (.d3dbsp)
    input: PathBuf,

    /// Print the lump table of the input
    #[arg(long)]
    info: bool,

    /// Export the input to a .map, next to it as `<name>_exported.map` unless
    /// `--export-path` is given
    #[arg(long)]
    export: bool,

    /// Where to write the exported map
    #[arg(long, value_name = "PATH")]
    export_path: Option<PathBuf>,

    /// Ini file with an [export] section
    #[arg(long, value_name = "INI")]
    config: Option<PathBuf>,

    /// Leave collision patches out of the map
    #[arg(long)]
    exclude_patches: bool,

    /// Keep the level's own portal brushes instead of merged portals
    #[arg(long)]
    native_portals: bool,

    /// Write brush model entities without their brushes
    #[arg(long)]
    no_entity_brushes: bool,
}

impl Cli {
    fn export_options(&self) -> Result<ExportOptions> {
        let mut options = match &self.config {
            Some(path) => config::load_options(path)?,
            None => ExportOptions::default(),
        };
        if self.exclude_patches {
            options.exclude_patches = true;
        }
        if self.native_portals {
            options.prefer_portal_brushes = false;
        }
        if self.no_entity_brushes {
            options.entity_brushes = false;
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = VFile::open(&cli.input).with_context(|| format!("Opening {:?}", cli.input))?;
    let level =
        LevelData::from_vfile(&file).with_context(|| format!("Loading {:?}", cli.input))?;

    if cli.info {
        let mut out = BufWriter::new(io::stdout().lock());
        info::write_info(&mut out, &file.name, &level)?;
        out.flush()?;
    }

    if cli.export || cli.export_path.is_some() {
        let options = cli.export_options()?;
        let output = cli
            .export_path
            .clone()
            .unwrap_or_else(|| exported_map_path(&cli.input));

        let geometry = reconstruct(&level);

        println!("Exporting to {:?}", output);
        // output errors don't fail the run
        if let Err(e) = write_map(&output, &geometry, &options) {
            log::error!("Failed to export {:?}: {:#}", output, e);
        }
    } else if !cli.info {
        log::warn!("Nothing to do, pass --info or --export");
    }

    Ok(())
}

fn write_map(
    output: &Path,
    geometry: &ReconstructedGeometry,
    options: &ExportOptions,
) -> Result<()> {
    let file = File::create(output).context("Creating output")?;
    let mut out = BufWriter::new(file);
    export_map(geometry, options, &mut out).context("Writing map")?;
    out.flush().context("Writing map")?;
    Ok(())
}
