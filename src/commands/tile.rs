use clap::Args;

use xlr_scaffold::generator::{GenerationReport, TileGenerator};
use xlr_scaffold::prompt::PresetPrompter;

use super::{run_generator, CmdResult, ProjectArgs};

#[derive(Args, Debug)]
pub struct TileArgs {
    /// Tile name, e.g. "Jira Task"
    #[arg(long)]
    pub tile_name: Option<String>,

    /// Tile namespace (defaults to the plugin namespace)
    #[arg(long)]
    pub tile_namespace: Option<String>,

    /// Label shown in the tile picker (defaults to the tile name)
    #[arg(long)]
    pub label: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: TileArgs) -> CmdResult<GenerationReport> {
    let mut preset = PresetPrompter::new();
    if let Some(name) = &args.tile_name {
        preset = preset.text("tileName", name);
    }
    if let Some(namespace) = &args.tile_namespace {
        preset = preset.text("tileNamespace", namespace);
    }
    if let Some(label) = &args.label {
        preset = preset.text("tileLabel", label);
    }

    let mut generator = TileGenerator::new();
    run_generator(&mut generator, preset, &args.project)
}
