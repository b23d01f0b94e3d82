//! Scaffolds a whole plugin project.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::features::{self, ExtXml, TestFramework};
use crate::install;
use crate::naming;
use crate::paths;
use crate::prompt::{Answer, Prompter, Question};
use crate::session::{AppConfig, SessionStore, APP_GENERATOR};
use crate::utils::template::TemplateVars;
use crate::utils::validation;

use super::{ask_text, Generator, Workspace};

#[derive(Debug, Default)]
pub struct AppGenerator {
    appname: String,
    previous: Option<AppConfig>,
    config: Option<AppConfig>,
}

impl AppGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_config(&self) -> Result<&AppConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| Error::internal_unexpected("application answers requested before prompting"))
    }

    fn plugin_name_default(&self) -> String {
        naming::kebab(&self.appname)
    }

    /// The answer a previous run gave to `question`, as recorded in the session.
    fn previous_answer(&self, question: &str) -> Option<Answer> {
        let prev = self.previous.as_ref()?;
        match question {
            "pluginName" => Some(Answer::Text(prev.plugin_name.clone())),
            "namespace" => Some(Answer::Text(prev.namespace.clone())),
            "extXmls" => Some(Answer::Choices(features::set_names(&prev.ext_xmls))),
            "testFrameworks" => Some(Answer::Choices(features::set_names(&prev.test_frameworks))),
            _ => None,
        }
    }

    fn write_build_files(&self, ws: &mut Workspace, config: &AppConfig) -> Result<()> {
        ws.copy("app/gradlew", Path::new("gradlew"))?;
        ws.copy("app/gradlew.bat", Path::new("gradlew.bat"))?;
        ws.copy(
            "app/gradle/gradle-wrapper.properties",
            &["gradle", "wrapper", "gradle-wrapper.properties"]
                .iter()
                .collect::<PathBuf>(),
        )?;

        ws.copy_with_variables(
            "app/settings.gradle",
            Path::new("settings.gradle"),
            &TemplateVars::new().text("kebabPluginName", &config.kebab_plugin_name),
        )?;
        ws.copy_with_variables(
            "app/build.gradle",
            Path::new("build.gradle"),
            &test_framework_vars(config).text("kebabPluginName", &config.kebab_plugin_name),
        )
    }

    /// Descriptors are only created when missing: tiles register themselves in them.
    fn write_resources(&self, ws: &mut Workspace, config: &AppConfig) -> Result<()> {
        ws.ensure_dir(&paths::main_resources())?;
        copy_if_missing(ws, "app/synthetic.xml", &paths::synthetic_xml())?;

        for kind in &config.ext_xmls {
            copy_if_missing(ws, &format!("app/{}", kind.file_name()), &paths::ext_xml(*kind))?;
        }
        Ok(())
    }

    fn write_npm(&self, ws: &mut Workspace, config: &AppConfig) -> Result<()> {
        let vars = test_framework_vars(config)
            .text("pluginName", json_string_body(&config.plugin_name))
            .text("kebabPluginName", &config.kebab_plugin_name);
        ws.copy_with_variables("app/package.json", Path::new("package.json"), &vars)
    }

    fn write_test_runners(&self, ws: &mut Workspace, config: &AppConfig) -> Result<()> {
        if config.uses(TestFramework::Karma) {
            ws.ensure_dir(&paths::test_js_unit())?;
            ws.copy("app/karma.conf.js", Path::new("karma.conf.js"))?;
        }

        if config.uses(TestFramework::Unittest) {
            ws.ensure_dir(&paths::test_jython_unit_runner())?;
            ws.copy(
                "app/runtests.py",
                &paths::test_jython_unit_runner().join("runtests.py"),
            )?;
        }
        Ok(())
    }

    fn write_docs(&self, ws: &mut Workspace, config: &AppConfig) -> Result<()> {
        let vars = test_framework_vars(config)
            .text("pluginName", &config.plugin_name)
            .text("jsUnitTestDir", paths::display(&paths::test_js_unit()))
            .text("jythonUnitTestDir", paths::display(&paths::test_jython_unit()));
        ws.copy_with_variables("app/README.md", Path::new("README.md"), &vars)?;
        ws.copy("app/gitignore", Path::new(".gitignore"))
    }
}

impl Generator for AppGenerator {
    fn name(&self) -> &'static str {
        APP_GENERATOR
    }

    fn initializing(&mut self, session: &SessionStore, project_root: &Path) -> Result<()> {
        self.appname = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // A partial or outdated record only seeds defaults; it is rewritten in configuring.
        self.previous = match session.get_record(APP_GENERATOR) {
            Ok(previous) => previous,
            Err(err) => {
                log_status!("skip", "Ignoring previous answers: {} {}", err.message, err.details);
                None
            }
        };
        Ok(())
    }

    fn prompting(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let question = Question::input("pluginName", "Your plugin name")
            .with_default(self.plugin_name_default())
            .stored()
            .with_previous(self.previous_answer("pluginName"));
        let plugin_name = ask_text(prompter, &question)?;
        let plugin_name = validation::require_identifier_chars(&plugin_name, "pluginName")?.to_string();

        let question = Question::input("namespace", "Default namespace")
            .with_previous(self.previous_answer("namespace"));
        let namespace = ask_text(prompter, &question)?;
        let namespace = validation::require_identifier_chars(&namespace, "namespace")?.to_string();

        let question = Question::checkbox(
            "extXmls",
            "Generate additional extensions XMLs?",
            ExtXml::ALL.iter().map(ExtXml::as_str),
        )
        .stored()
        .with_previous(self.previous_answer("extXmls"));
        let ext_xmls: BTreeSet<ExtXml> = features::parse_set(&prompter.ask(&question)?.into_choices())?;

        let question = Question::checkbox(
            "testFrameworks",
            "Which test frameworks to use?",
            TestFramework::ALL.iter().map(TestFramework::as_str),
        )
        .stored()
        .with_previous(self.previous_answer("testFrameworks"));
        let test_frameworks: BTreeSet<TestFramework> =
            features::parse_set(&prompter.ask(&question)?.into_choices())?;

        self.config = Some(AppConfig {
            kebab_plugin_name: naming::kebab(&plugin_name),
            plugin_name,
            namespace,
            ext_xmls,
            test_frameworks,
        });
        Ok(())
    }

    fn configuring(&mut self, session: &mut SessionStore) -> Result<()> {
        let config = self.require_config()?;
        session.set_record(APP_GENERATOR, config)
    }

    fn writing(&mut self, ws: &mut Workspace) -> Result<()> {
        let config = self.require_config()?.clone();

        self.write_build_files(ws, &config)?;
        self.write_resources(ws, &config)?;
        self.write_npm(ws, &config)?;
        self.write_test_runners(ws, &config)?;
        self.write_docs(ws, &config)
    }

    fn install(&mut self, project_root: &Path) -> Result<bool> {
        install::npm_install(project_root)?;
        Ok(true)
    }

    fn end(&self) -> Vec<String> {
        let mut steps = vec![
            "Run './gradlew build' to package the plugin".to_string(),
            "Run 'xlr-scaffold tile' to add a dashboard tile".to_string(),
        ];
        if let Some(config) = &self.config {
            if config.uses(TestFramework::Karma) {
                steps.push("Run 'npm test' to execute the Karma suite".to_string());
            }
        }
        steps
    }

    fn names(&self) -> BTreeMap<String, String> {
        let mut names = BTreeMap::new();
        if let Some(config) = &self.config {
            names.insert("pluginName".to_string(), config.plugin_name.clone());
            names.insert("kebabPluginName".to_string(), config.kebab_plugin_name.clone());
            names.insert("namespace".to_string(), naming::dot_namespace(&config.namespace));
        }
        names
    }
}

fn copy_if_missing(ws: &mut Workspace, template_id: &str, relative: &Path) -> Result<()> {
    if ws.exists(relative) {
        log_status!("skip", "{} already exists", relative.display());
        return Ok(());
    }
    ws.copy(template_id, relative)
}

fn test_framework_vars(config: &AppConfig) -> TemplateVars {
    TemplateVars::new()
        .list("testFrameworks", features::set_names(&config.test_frameworks))
        .flag("karma", config.uses(TestFramework::Karma))
        .flag("unittest", config.uses(TestFramework::Unittest))
}

/// Contents of a JSON string literal, without the surrounding quotes.
fn json_string_body(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
