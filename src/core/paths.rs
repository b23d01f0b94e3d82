//! Fixed locations inside a generated plugin project.
//!
//! All paths are relative to the project root.

use std::path::PathBuf;

/// Per-project session store, written at the project root.
pub const SESSION_FILE: &str = ".xlr-scaffold.json";

pub fn main_resources() -> PathBuf {
    ["src", "main", "resources"].iter().collect()
}

pub fn web_include() -> PathBuf {
    main_resources().join("web").join("include")
}

pub fn test_js_unit() -> PathBuf {
    ["src", "test", "javascript", "unit"].iter().collect()
}

pub fn test_jython_unit() -> PathBuf {
    ["src", "test", "jython"].iter().collect()
}

pub fn test_jython_unit_runner() -> PathBuf {
    test_jython_unit().join("xlunittestrunner")
}

pub fn synthetic_xml() -> PathBuf {
    main_resources().join("synthetic.xml")
}

pub fn ext_xml(kind: crate::features::ExtXml) -> PathBuf {
    main_resources().join(kind.file_name())
}

/// Forward-slash rendering of a relative path, for output and templates.
pub fn display(path: &std::path::Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ExtXml;

    #[test]
    fn layout_matches_plugin_conventions() {
        assert_eq!(display(&synthetic_xml()), "src/main/resources/synthetic.xml");
        assert_eq!(display(&web_include()), "src/main/resources/web/include");
        assert_eq!(
            display(&test_jython_unit_runner()),
            "src/test/jython/xlunittestrunner"
        );
        assert_eq!(
            display(&ext_xml(ExtXml::XlUiPlugin)),
            "src/main/resources/xl-ui-plugin.xml"
        );
    }
}
