use std::path::PathBuf;

use clap::Args;

use xlr_scaffold::generator::{self, Generator, GenerationReport, RunOptions};
use xlr_scaffold::prompt::{PresetPrompter, Prompter, TerminalPrompter};

pub type CmdResult<T> = xlr_scaffold::Result<(T, i32)>;

/// Arguments shared by every generator command.
#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<String>,

    /// Skip `npm install` after writing files
    #[arg(long)]
    pub skip_install: bool,

    /// Accept the default answer for every question not given as a flag
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl ProjectArgs {
    pub fn run_options(&self) -> xlr_scaffold::Result<RunOptions> {
        let project_root = match &self.dest {
            Some(dest) => PathBuf::from(shellexpand::tilde(dest).as_ref()),
            None => std::env::current_dir().map_err(|e| {
                xlr_scaffold::Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
            })?,
        };

        Ok(RunOptions {
            project_root,
            skip_install: self.skip_install,
        })
    }
}

/// Run a generator with flag answers first, then the terminal when one is attached.
///
/// Without a terminal, defaults are accepted and anything still unanswered
/// fails as a missing argument.
pub(crate) fn run_generator(
    scaffold: &mut dyn Generator,
    preset: PresetPrompter<'static>,
    project: &ProjectArgs,
) -> CmdResult<GenerationReport> {
    let options = project.run_options()?;
    let interactive = crate::tty::can_prompt();

    let mut prompter = preset.accept_defaults(project.yes || !interactive);
    if interactive {
        prompter = prompter.fallback(TerminalPrompter::stdio());
    }

    let report = generator::run(scaffold, &mut prompter as &mut dyn Prompter, &options)?;
    Ok((report, 0))
}

pub mod app;
pub mod tile;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (xlr_scaffold::Result<serde_json::Value>, i32) {
    crate::tty::status("xlr-scaffold is working...");

    match command {
        crate::Commands::App(args) => dispatch!(args, app),
        crate::Commands::Tile(args) => dispatch!(args, tile),
    }
}
