//! Scaffolds one dashboard tile inside an existing plugin project.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::features::{ExtXml, TestFramework};
use crate::naming;
use crate::paths;
use crate::prompt::{Prompter, Question};
use crate::session::{AppConfig, SessionStore, APP_GENERATOR};
use crate::utils::template::TemplateVars;
use crate::utils::validation;
use crate::xml_insert::escape_attr;

use super::{ask_text, Generator, Workspace};

/// Prefix of every generated UI module id.
pub const MODULE_PREFIX: &str = "xlrelease";
/// Type every tile extends.
pub const BASE_TILE_TYPE: &str = "xlrelease.Tile";

pub const SYNTHETIC_SENTINEL: &str = "</synthetic>";
pub const UI_PLUGIN_SENTINEL: &str = "</plugin>";

/// Every name derived from the tile answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileNames {
    pub name: String,
    pub label: String,
    pub namespace: String,
    pub namespace_path: PathBuf,
    pub namespace_uri: String,
    pub pascal: String,
    pub kebab: String,
    pub controller: String,
    pub kebab_controller: String,
    pub module_id: String,
}

impl TileNames {
    pub fn derive(name: &str, namespace: &str, label: &str) -> Self {
        let pascal = naming::pascal(name);
        let controller = format!("{}Controller", pascal);
        Self {
            name: name.to_string(),
            label: label.to_string(),
            namespace: naming::dot_namespace(namespace),
            namespace_path: naming::namespace_to_path(namespace),
            namespace_uri: naming::namespace_uri_path(namespace),
            kebab: naming::kebab(name),
            kebab_controller: naming::kebab(&controller),
            module_id: naming::module_id(MODULE_PREFIX, namespace, name),
            pascal,
            controller,
        }
    }

    /// Synthetic type name, e.g. `jira.JiraTask`.
    pub fn type_name(&self) -> String {
        format!("{}.{}", self.namespace, self.pascal)
    }

    /// Directory holding the tile's web assets, relative to the project root.
    pub fn include_dir(&self) -> PathBuf {
        paths::web_include()
            .join(&self.namespace_path)
            .join(&self.pascal)
    }

    fn include_uri(&self, file: &str) -> String {
        format!("include/{}/{}/{}", self.namespace_uri, self.pascal, file)
    }

    pub fn summary_view(&self) -> String {
        format!("{}-summary-view.html", self.kebab)
    }

    pub fn details_view(&self) -> String {
        format!("{}-details-view.html", self.kebab)
    }

    /// `<type>` block registered in `synthetic.xml`.
    pub fn type_fragment(&self) -> Vec<String> {
        vec![
            format!(
                "    <type type=\"{}\" label=\"{}\" extends=\"{}\">",
                escape_attr(&self.type_name()),
                escape_attr(&self.label),
                BASE_TILE_TYPE
            ),
            format!(
                "        <property name=\"uri\" hidden=\"true\" default=\"{}\" />",
                escape_attr(&self.include_uri(&self.summary_view()))
            ),
            format!(
                "        <property name=\"detailsUri\" hidden=\"true\" default=\"{}\" />",
                escape_attr(&self.include_uri(&self.details_view()))
            ),
            format!(
                "        <property name=\"title\" description=\"Tile title\" default=\"{}\"/>",
                escape_attr(&self.name)
            ),
            "        <!-- Add tile properties here! -->".to_string(),
            "    </type>".to_string(),
        ]
    }

    /// `<library>` entry registered in `xl-ui-plugin.xml`.
    pub fn library_fragment(&self) -> Vec<String> {
        vec![format!("    <library name=\"{}\"/>", escape_attr(&self.module_id))]
    }

    fn vars(&self) -> TemplateVars {
        TemplateVars::new()
            .text("tileName", &self.name)
            .text("moduleName", &self.module_id)
            .text("controllerName", &self.controller)
            .text("kebabTileName", &self.kebab)
    }
}

#[derive(Debug, Default)]
pub struct TileGenerator {
    app: Option<AppConfig>,
    names: Option<TileNames>,
}

impl TileGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_app(&self) -> Result<&AppConfig> {
        self.app
            .as_ref()
            .ok_or_else(|| Error::internal_unexpected("tile generator used before initializing"))
    }

    fn require_names(&self) -> Result<&TileNames> {
        self.names
            .as_ref()
            .ok_or_else(|| Error::internal_unexpected("tile names requested before prompting"))
    }
}

impl Generator for TileGenerator {
    fn name(&self) -> &'static str {
        "tile"
    }

    fn initializing(&mut self, session: &SessionStore, _project_root: &Path) -> Result<()> {
        self.app = Some(session.require_app()?);
        Ok(())
    }

    fn prompting(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let app_namespace = self.require_app()?.namespace.clone();

        let name = ask_text(prompter, &Question::input("tileName", "Your tile name"))?;
        let name = validation::require_identifier_chars(&name, "tileName")?;
        let name = validation::require_letter_first(name, "tileName")?.to_string();

        let question = Question::input("tileNamespace", "Tile namespace").with_default(app_namespace);
        let namespace = ask_text(prompter, &question)?;
        let namespace = validation::require_identifier_chars(&namespace, "tileNamespace")?.to_string();

        let question = Question::input("tileLabel", "Tile label").with_default(name.clone());
        let label = ask_text(prompter, &question)?;
        let label = validation::require_non_empty(&label, "tileLabel", "tileLabel cannot be empty")?
            .to_string();

        self.names = Some(TileNames::derive(&name, &namespace, &label));
        Ok(())
    }


    fn writing(&mut self, ws: &mut Workspace) -> Result<()> {
        let karma = self.require_app()?.uses(TestFramework::Karma);
        let names = self.require_names()?.clone();
        let vars = names.vars();

        let script_dir = paths::main_resources().join(&names.namespace_path);
        ws.ensure_dir(&script_dir)?;
        ws.copy_with_variables(
            "tile/TileScript.py",
            &script_dir.join(format!("{}.py", names.pascal)),
            &vars,
        )?;

        let include = names.include_dir();
        for sub in ["js", "css", "img"] {
            ws.ensure_dir(&include.join(sub))?;
        }

        ws.copy_with_variables(
            "tile/tile-app.js",
            &include.join("js").join(format!("{}-app.js", names.kebab)),
            &vars,
        )?;
        ws.copy_with_variables(
            "tile/tile-controller.js",
            &include.join("js").join(format!("{}.js", names.kebab_controller)),
            &vars,
        )?;

        if karma {
            let test_dir = paths::test_js_unit()
                .join(&names.namespace_path)
                .join(&names.pascal);
            ws.ensure_dir(&test_dir)?;
            ws.copy_with_variables(
                "tile/tile-controller.spec.js",
                &test_dir.join(format!("{}.spec.js", names.kebab_controller)),
                &vars,
            )?;
        }

        ws.copy_with_variables(
            "tile/tile.css",
            &include.join("css").join(format!("{}.css", names.kebab)),
            &vars,
        )?;
        ws.copy_with_variables(
            "tile/tile-summary-view.html",
            &include.join(names.summary_view()),
            &vars,
        )?;
        ws.copy_with_variables(
            "tile/tile-details-view.html",
            &include.join(names.details_view()),
            &vars,
        )?;

        ws.insert_before(&paths::synthetic_xml(), SYNTHETIC_SENTINEL, &names.type_fragment())?;

        let ui_plugin = paths::ext_xml(ExtXml::XlUiPlugin);
        if !ws.exists(&ui_plugin) {
            ws.copy("app/xl-ui-plugin.xml", &ui_plugin)?;
        }
        ws.insert_before(&ui_plugin, UI_PLUGIN_SENTINEL, &names.library_fragment())?;

        Ok(())
    }

    fn recording(&mut self, session: &mut SessionStore) -> Result<()> {
        let Some(app) = self.app.as_mut() else {
            return Err(Error::internal_unexpected("tile generator used before initializing"));
        };

        // xl-ui-plugin.xml exists now, whether or not the app selected it.
        if !app.has_ext_xml(ExtXml::XlUiPlugin) {
            app.ext_xmls.insert(ExtXml::XlUiPlugin);
            session.set(APP_GENERATOR, "extXmls", &app.ext_xmls)?;
        }
        Ok(())
    }

    fn end(&self) -> Vec<String> {
        match &self.names {
            Some(names) => vec![format!(
                "Rebuild the plugin and restart XL Release to use tile type {}",
                names.type_name()
            )],
            None => Vec::new(),
        }
    }

    fn names(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if let Some(names) = &self.names {
            out.insert("typeName".to_string(), names.type_name());
            out.insert("pascalTileName".to_string(), names.pascal.clone());
            out.insert("kebabTileName".to_string(), names.kebab.clone());
            out.insert("controllerName".to_string(), names.controller.clone());
            out.insert("moduleName".to_string(), names.module_id.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jira() -> TileNames {
        TileNames::derive("Jira Task", "jira", "Jira Task Tile")
    }

    #[test]
    fn derives_all_names() {
        let names = jira();
        assert_eq!(names.pascal, "JiraTask");
        assert_eq!(names.kebab, "jira-task");
        assert_eq!(names.module_id, "xlrelease.jira.jiratask");
        assert_eq!(names.controller, "JiraTaskController");
        assert_eq!(names.kebab_controller, "jira-task-controller");
        assert_eq!(names.type_name(), "jira.JiraTask");
    }

    #[test]
    fn type_fragment_matches_synthetic_schema() {
        let fragment = jira().type_fragment();
        assert_eq!(
            fragment[0],
            "    <type type=\"jira.JiraTask\" label=\"Jira Task Tile\" extends=\"xlrelease.Tile\">"
        );
        assert!(fragment[1].contains("default=\"include/jira/JiraTask/jira-task-summary-view.html\""));
        assert!(fragment[2].contains("default=\"include/jira/JiraTask/jira-task-details-view.html\""));
        assert_eq!(fragment.last().unwrap(), "    </type>");
    }

    #[test]
    fn nested_namespace_uses_forward_slashes_in_uris() {
        let names = TileNames::derive("Build Status", "com.acme", "Build");
        assert!(names.type_fragment()[1].contains("include/com/acme/BuildStatus/"));
        assert_eq!(names.type_name(), "com.acme.BuildStatus");
        assert_eq!(
            names.include_dir(),
            paths::web_include().join("com").join("acme").join("BuildStatus")
        );
    }

    #[test]
    fn label_is_escaped() {
        let names = TileNames::derive("Deploy", "ops", "R&D \"Deploy\"");
        assert!(names.type_fragment()[0].contains("label=\"R&amp;D &quot;Deploy&quot;\""));
    }

    #[test]
    fn library_fragment_names_module() {
        assert_eq!(
            jira().library_fragment(),
            vec!["    <library name=\"xlrelease.jira.jiratask\"/>".to_string()]
        );
    }

    #[test]
    fn empty_name_derives_empty_forms() {
        let names = TileNames::derive("", "jira", "");
        assert_eq!(names.pascal, "");
        assert_eq!(names.kebab, "");
        assert_eq!(names.module_id, "xlrelease.jira");
    }
}
