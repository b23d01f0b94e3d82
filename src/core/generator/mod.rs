//! Generator phases and the workspace they write into.
//!
//! A run is strictly sequential: initializing, prompting, configuring (the
//! session store is saved here, after every prompt resolved), writing,
//! recording (saved again, only once writing succeeded), install, end. Any
//! error aborts the run at the phase that raised it.

pub mod app;
pub mod tile;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::materializer::Materializer;
use crate::paths;
use crate::prompt::Prompter;
use crate::session::SessionStore;
use crate::utils::io;
use crate::utils::template::TemplateVars;
use crate::xml_insert::{self, InsertOutcome};

pub use app::AppGenerator;
pub use tile::{TileGenerator, TileNames};

pub trait Generator {
    /// Stable name, also the key of any record the generator persists.
    fn name(&self) -> &'static str;

    fn initializing(&mut self, _session: &SessionStore, _project_root: &Path) -> Result<()> {
        Ok(())
    }

    fn prompting(&mut self, prompter: &mut dyn Prompter) -> Result<()>;

    fn configuring(&mut self, _session: &mut SessionStore) -> Result<()> {
        Ok(())
    }

    fn writing(&mut self, workspace: &mut Workspace) -> Result<()>;

    /// Persist facts that only hold once every file was written.
    fn recording(&mut self, _session: &mut SessionStore) -> Result<()> {
        Ok(())
    }

    /// Returns whether anything was installed.
    fn install(&mut self, _project_root: &Path) -> Result<bool> {
        Ok(false)
    }

    /// Messages shown once the run completed.
    fn end(&self) -> Vec<String> {
        Vec::new()
    }

    /// Derived names worth reporting back to the user.
    fn names(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub project_root: PathBuf,
    pub skip_install: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionRecord {
    pub file: String,
    pub outcome: InsertOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub generator: String,
    pub project_root: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    pub created_dirs: Vec<String>,
    pub written: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insertions: Vec<InsertionRecord>,
    pub installed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
}

/// Project-rooted file operations that remember what they touched.
pub struct Workspace {
    materializer: Materializer,
    created_dirs: Vec<String>,
    written: Vec<String>,
    insertions: Vec<InsertionRecord>,
}

impl Workspace {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            materializer: Materializer::new(project_root),
            created_dirs: Vec::new(),
            written: Vec::new(),
            insertions: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.materializer.root()
    }

    pub fn exists(&self, relative: &Path) -> bool {
        self.root().join(relative).exists()
    }

    pub fn ensure_dir(&mut self, relative: &Path) -> Result<()> {
        if io::ensure_dir(&self.root().join(relative))? {
            log_status!("create", "{}/", relative.display());
            self.created_dirs.push(paths::display(relative));
        }
        Ok(())
    }

    pub fn copy(&mut self, template_id: &str, relative: &Path) -> Result<()> {
        self.materializer.copy(template_id, relative)?;
        self.written.push(paths::display(relative));
        Ok(())
    }

    pub fn copy_with_variables(
        &mut self,
        template_id: &str,
        relative: &Path,
        variables: &TemplateVars,
    ) -> Result<()> {
        self.materializer
            .copy_with_variables(template_id, relative, variables)?;
        self.written.push(paths::display(relative));
        Ok(())
    }

    pub fn insert_before<S: AsRef<str>>(
        &mut self,
        relative: &Path,
        sentinel: &str,
        fragment_lines: &[S],
    ) -> Result<InsertOutcome> {
        let outcome = xml_insert::insert_before(&self.root().join(relative), sentinel, fragment_lines)?;
        self.insertions.push(InsertionRecord {
            file: paths::display(relative),
            outcome,
        });
        Ok(outcome)
    }
}

/// Drive a generator through all of its phases.
pub fn run(
    generator: &mut dyn Generator,
    prompter: &mut dyn Prompter,
    options: &RunOptions,
) -> Result<GenerationReport> {
    let name = generator.name();
    let root = &options.project_root;

    log_status!("phase", "{}: initializing", name);
    let mut session = SessionStore::load(root)?;
    generator.initializing(&session, root)?;

    log_status!("phase", "{}: prompting", name);
    generator.prompting(prompter)?;

    log_status!("phase", "{}: configuring", name);
    generator.configuring(&mut session)?;
    session.save()?;

    log_status!("phase", "{}: writing", name);
    io::ensure_dir(root)?;
    let mut workspace = Workspace::new(root.clone());
    generator.writing(&mut workspace)?;
    generator.recording(&mut session)?;
    session.save()?;

    let installed = if options.skip_install {
        log_status!("phase", "{}: install skipped", name);
        false
    } else {
        log_status!("phase", "{}: install", name);
        generator.install(root)?
    };

    let next_steps = generator.end();

    Ok(GenerationReport {
        generator: name.to_string(),
        project_root: root.display().to_string(),
        names: generator.names(),
        created_dirs: workspace.created_dirs,
        written: workspace.written,
        insertions: workspace.insertions,
        installed,
        next_steps,
    })
}

/// Ask a free-text question and return the trimmed answer.
pub(crate) fn ask_text(prompter: &mut dyn Prompter, question: &crate::prompt::Question) -> Result<String> {
    let answer = prompter.ask(question)?.into_text(&question.name)?;
    Ok(answer.trim().to_string())
}
