//! Name and namespace derivations.
//!
//! Every function here is pure: the same input always yields the same output.
//! Empty input yields empty output; rejecting blank names is the prompt layer's job.

use std::path::PathBuf;

use heck::{ToKebabCase, ToLowerCamelCase, ToUpperCamelCase};

const NAMESPACE_SEPARATORS: &[char] = &['.', '/', '\\'];

/// Non-empty segments of a dot- or slash-delimited namespace.
///
/// Runs of separators collapse, so `"com..acme//jira"` has three segments.
pub fn namespace_segments(namespace: &str) -> Vec<&str> {
    namespace
        .split(NAMESPACE_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Namespace as a relative filesystem path using the host separator.
pub fn namespace_to_path(namespace: &str) -> PathBuf {
    namespace_segments(namespace).into_iter().collect()
}

/// Namespace as a forward-slash path, for URIs inside descriptors.
pub fn namespace_uri_path(namespace: &str) -> String {
    namespace_segments(namespace).join("/")
}

/// Namespace in dotted form (`"com/acme"` -> `"com.acme"`).
pub fn dot_namespace(namespace: &str) -> String {
    namespace_segments(namespace).join(".")
}

/// Lowercase with every non-alphanumeric character removed (`"Jira Task"` -> `"jiratask"`).
pub fn lower_case_compact(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `"Jira Task"` -> `"jira-task"`
pub fn kebab(name: &str) -> String {
    name.to_kebab_case()
}

/// `"Jira Task"` -> `"JiraTask"`
pub fn pascal(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `"Jira Task"` -> `"jiraTask"`
pub fn camel(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Fully qualified module identifier: `prefix.namespace.compactname`.
///
/// Empty parts are skipped rather than producing doubled dots.
pub fn module_id(prefix: &str, namespace: &str, name: &str) -> String {
    let namespace = dot_namespace(namespace);
    let compact = lower_case_compact(name);
    [prefix, namespace.as_str(), compact.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn namespace_maps_to_nested_dirs() {
        assert_eq!(
            namespace_to_path("com.acme.jira"),
            Path::new("com").join("acme").join("jira")
        );
    }

    #[test]
    fn slash_namespace_maps_to_same_path() {
        assert_eq!(
            namespace_to_path("com/acme/jira"),
            namespace_to_path("com.acme.jira")
        );
    }

    #[test]
    fn consecutive_separators_collapse() {
        assert_eq!(namespace_uri_path("com..acme//jira."), "com/acme/jira");
        assert_eq!(dot_namespace("/com/acme/"), "com.acme");
    }

    #[test]
    fn compact_strips_whitespace_and_punctuation() {
        assert_eq!(lower_case_compact("Jira Task"), "jiratask");
        assert_eq!(lower_case_compact("My-Tile_v2!"), "mytilev2");
    }

    #[test]
    fn case_variants() {
        assert_eq!(kebab("Jira Task"), "jira-task");
        assert_eq!(pascal("Jira Task"), "JiraTask");
        assert_eq!(camel("Jira Task"), "jiraTask");
        assert_eq!(kebab("JiraTaskController"), "jira-task-controller");
    }

    #[test]
    fn module_id_joins_prefix_namespace_and_compact_name() {
        assert_eq!(module_id("xlrelease", "jira", "Jira Task"), "xlrelease.jira.jiratask");
        assert_eq!(
            module_id("xlrelease", "com/acme", "Build Status"),
            "xlrelease.com.acme.buildstatus"
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(kebab(""), "");
        assert_eq!(pascal(""), "");
        assert_eq!(camel(""), "");
        assert_eq!(lower_case_compact(""), "");
        assert_eq!(namespace_to_path(""), PathBuf::new());
        assert_eq!(dot_namespace(""), "");
        assert_eq!(module_id("xlrelease", "", ""), "xlrelease");
    }

    #[test]
    fn transforms_are_deterministic() {
        for input in ["Jira Task", "com.acme.jira", "  spaced  out ", "ÄÖ tile"] {
            assert_eq!(kebab(input), kebab(input));
            assert_eq!(pascal(input), pascal(input));
            assert_eq!(lower_case_compact(input), lower_case_compact(input));
            assert_eq!(namespace_to_path(input), namespace_to_path(input));
        }
    }
}
