use std::fs;
use std::path::Path;

use tempfile::tempdir;
use xlr_scaffold::generator::{self, AppGenerator, RunOptions, TileGenerator};
use xlr_scaffold::prompt::PresetPrompter;
use xlr_scaffold::session::{SessionStore, APP_GENERATOR};
use xlr_scaffold::xml_insert::InsertOutcome;

fn options(root: &Path) -> RunOptions {
    RunOptions {
        project_root: root.to_path_buf(),
        skip_install: true,
    }
}

fn scaffold_app(root: &Path, frameworks: &[&str]) {
    let mut prompter = PresetPrompter::new()
        .text("pluginName", "Jira Plugin")
        .text("namespace", "jira")
        .choices("extXmls", ["xl-rest-endpoints"])
        .choices("testFrameworks", frameworks.iter().copied());
    generator::run(&mut AppGenerator::new(), &mut prompter, &options(root)).unwrap();
}

fn scaffold_tile(root: &Path) -> generator::GenerationReport {
    let mut prompter = PresetPrompter::new()
        .text("tileName", "Jira Task")
        .text("tileLabel", "Jira Task Tile")
        .accept_defaults(true);
    generator::run(&mut TileGenerator::new(), &mut prompter, &options(root)).unwrap()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn app_writes_project_and_session() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &["karma", "unittest"]);

    for file in [
        "build.gradle",
        "settings.gradle",
        "gradlew",
        "gradlew.bat",
        "gradle/wrapper/gradle-wrapper.properties",
        "package.json",
        "karma.conf.js",
        "README.md",
        ".gitignore",
        "src/main/resources/synthetic.xml",
        "src/main/resources/xl-rest-endpoints.xml",
        "src/test/jython/xlunittestrunner/runtests.py",
    ] {
        assert!(root.join(file).is_file(), "missing {}", file);
    }
    assert!(root.join("src/test/javascript/unit").is_dir());
    assert!(!root.join("src/main/resources/xl-ui-plugin.xml").exists());

    assert!(read(root, "settings.gradle").contains("jira-plugin"));
    assert!(read(root, "package.json").contains("\"name\": \"jira-plugin\""));

    let app = SessionStore::load(root).unwrap().require_app().unwrap();
    assert_eq!(app.plugin_name, "Jira Plugin");
    assert_eq!(app.kebab_plugin_name, "jira-plugin");
    assert_eq!(app.namespace, "jira");
}

#[test]
fn tile_registers_type_and_library() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &["karma"]);
    let report = scaffold_tile(root);

    let include = "src/main/resources/web/include/jira/JiraTask";
    for file in [
        "src/main/resources/jira/JiraTask.py".to_string(),
        format!("{}/js/jira-task-app.js", include),
        format!("{}/js/jira-task-controller.js", include),
        format!("{}/css/jira-task.css", include),
        format!("{}/jira-task-summary-view.html", include),
        format!("{}/jira-task-details-view.html", include),
        "src/test/javascript/unit/jira/JiraTask/jira-task-controller.spec.js".to_string(),
    ] {
        assert!(root.join(&file).is_file(), "missing {}", file);
    }
    assert!(root.join(include).join("img").is_dir());

    let synthetic = read(root, "src/main/resources/synthetic.xml");
    let type_at = synthetic.find("<type type=\"jira.JiraTask\"").unwrap();
    assert!(type_at < synthetic.find("</synthetic>").unwrap());
    assert!(synthetic.contains("label=\"Jira Task Tile\""));

    let ui_plugin = read(root, "src/main/resources/xl-ui-plugin.xml");
    assert!(ui_plugin.contains("<library name=\"xlrelease.jira.jiratask\"/>"));

    let app_js = read(root, &format!("{}/js/jira-task-app.js", include));
    assert!(app_js.contains("xlrelease.jira.jiratask"));

    assert_eq!(report.names["typeName"], "jira.JiraTask");
    assert!(report
        .insertions
        .iter()
        .all(|i| i.outcome == InsertOutcome::Inserted));

    let session = SessionStore::load(root).unwrap();
    let ext_xmls: Vec<String> = session.get(APP_GENERATOR, "extXmls").unwrap().unwrap();
    assert_eq!(ext_xmls, vec!["xl-rest-endpoints", "xl-ui-plugin"]);
}

#[test]
fn tile_twice_inserts_once() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &[]);
    scaffold_tile(root);
    let second = scaffold_tile(root);

    let synthetic = read(root, "src/main/resources/synthetic.xml");
    assert_eq!(synthetic.matches("<type type=\"jira.JiraTask\"").count(), 1);

    let ui_plugin = read(root, "src/main/resources/xl-ui-plugin.xml");
    assert_eq!(
        ui_plugin
            .matches("<library name=\"xlrelease.jira.jiratask\"/>")
            .count(),
        1
    );

    assert!(second
        .insertions
        .iter()
        .all(|i| i.outcome == InsertOutcome::AlreadyPresent));
}

#[test]
fn tile_without_karma_has_no_controller_test() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &["unittest"]);
    scaffold_tile(root);

    assert!(!root.join("src/test/javascript").exists());
}

#[test]
fn tile_without_app_reports_missing_config() {
    let dir = tempdir().unwrap();
    let mut prompter = PresetPrompter::new().text("tileName", "Jira Task");

    let err = generator::run(&mut TileGenerator::new(), &mut prompter, &options(dir.path()))
        .unwrap_err();

    assert_eq!(err.code.as_str(), "config.missing");
    assert!(!dir.path().join("src").exists());
}

#[test]
fn unanswered_question_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut prompter = PresetPrompter::new().text("pluginName", "Jira Plugin");

    let err = generator::run(&mut AppGenerator::new(), &mut prompter, &options(dir.path()))
        .unwrap_err();

    assert_eq!(err.code.as_str(), "validation.missing_argument");
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn rerun_app_reuses_stored_answers_as_defaults() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &["karma"]);

    let mut prompter = PresetPrompter::new()
        .text("namespace", "jira")
        .accept_defaults(true);
    let report = generator::run(&mut AppGenerator::new(), &mut prompter, &options(root)).unwrap();

    assert_eq!(report.names["pluginName"], "Jira Plugin");
    assert_eq!(report.names["namespace"], "jira");
    assert!(root.join("karma.conf.js").is_file());
}

fn tree(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            out.push(path.strip_prefix(root).unwrap().display().to_string());
            if path.is_dir() {
                stack.push(path);
            }
        }
    }
    out.sort();
    out
}

#[test]
fn rerun_app_keeps_tile_registrations() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &["karma"]);
    scaffold_tile(root);

    let mut prompter = PresetPrompter::new()
        .text("namespace", "jira")
        .accept_defaults(true);
    generator::run(&mut AppGenerator::new(), &mut prompter, &options(root)).unwrap();

    let synthetic = read(root, "src/main/resources/synthetic.xml");
    assert!(synthetic.contains("<type type=\"jira.JiraTask\""));
    let ui_plugin = read(root, "src/main/resources/xl-ui-plugin.xml");
    assert!(ui_plugin.contains("<library name=\"xlrelease.jira.jiratask\"/>"));

    // Regular files are still refreshed from their templates.
    fs::write(root.join("settings.gradle"), "edited").unwrap();
    let mut prompter = PresetPrompter::new()
        .text("namespace", "jira")
        .accept_defaults(true);
    generator::run(&mut AppGenerator::new(), &mut prompter, &options(root)).unwrap();
    assert!(read(root, "settings.gradle").contains("jira-plugin"));
}

#[test]
fn malformed_app_record_is_replaced() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join(".xlr-scaffold.json"),
        r#"{"app": {"namespace": 5}}"#,
    )
    .unwrap();

    scaffold_app(root, &[]);

    let app = SessionStore::load(root).unwrap().require_app().unwrap();
    assert_eq!(app.namespace, "jira");
}

#[test]
fn failed_tile_does_not_record_ui_plugin() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &[]);
    fs::write(root.join("src/main/resources/synthetic.xml"), "<synthetic/>\n").unwrap();

    let mut prompter = PresetPrompter::new()
        .text("tileName", "Jira Task")
        .accept_defaults(true);
    let err = generator::run(&mut TileGenerator::new(), &mut prompter, &options(root))
        .unwrap_err();
    assert_eq!(err.code.as_str(), "xml.sentinel_not_found");

    let session = SessionStore::load(root).unwrap();
    let ext_xmls: Vec<String> = session.get(APP_GENERATOR, "extXmls").unwrap().unwrap();
    assert_eq!(ext_xmls, vec!["xl-rest-endpoints"]);
    assert!(!root.join("src/main/resources/xl-ui-plugin.xml").exists());
}

#[test]
fn invalid_tile_names_write_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    scaffold_app(root, &["karma"]);
    let before = tree(root);

    for name in ["", "!!!", "2FA Status"] {
        let mut prompter = PresetPrompter::new()
            .text("tileName", name)
            .accept_defaults(true);
        let err = generator::run(&mut TileGenerator::new(), &mut prompter, &options(root))
            .unwrap_err();

        assert_eq!(err.code.as_str(), "validation.invalid_argument", "name {:?}", name);
        assert_eq!(err.details["field"], "tileName");
    }

    assert_eq!(tree(root), before);
    assert!(!read(root, ".xlr-scaffold.json").contains("xl-ui-plugin"));
}
