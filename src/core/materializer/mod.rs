//! Materializes embedded templates into a project directory.

mod catalog;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;
use crate::utils::template::{self, TemplateVars};

pub use catalog::{ids, TemplateEntry};

/// Writes templates below a fixed root. Destinations are relative to that root.
#[derive(Debug, Clone)]
pub struct Materializer {
    root: PathBuf,
}

impl Materializer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy a template verbatim. Placeholders are not interpreted.
    pub fn copy(&self, template_id: &str, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let entry = lookup(template_id)?;
        self.write(entry, destination.as_ref(), entry.body)
    }

    /// Render a template with `variables` and write the result.
    pub fn copy_with_variables(
        &self,
        template_id: &str,
        destination: impl AsRef<Path>,
        variables: &TemplateVars,
    ) -> Result<PathBuf> {
        let entry = lookup(template_id)?;
        let rendered = template::render(template_id, entry.body, variables)?;
        self.write(entry, destination.as_ref(), &rendered)
    }

    fn write(&self, entry: &TemplateEntry, destination: &Path, content: &str) -> Result<PathBuf> {
        let target = self.root.join(destination);

        if let Some(parent) = target.parent() {
            io::ensure_dir(parent)?;
        }
        io::write_file_atomic(&target, content, "write template")?;
        if entry.executable {
            io::set_executable(&target)?;
        }

        log_status!("create", "{}", destination.display());
        Ok(target)
    }
}

fn lookup(template_id: &str) -> Result<&'static TemplateEntry> {
    catalog::find(template_id).ok_or_else(|| Error::template_not_found(template_id))
}
