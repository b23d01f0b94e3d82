//! Textual insertion of fragments into generated XML descriptors.
//!
//! The target is treated as plain text: no parsing, no reformatting of the
//! surrounding content. Insertion is idempotent because a fragment already
//! present verbatim is never inserted again.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// Insert `fragment_lines` before the first occurrence of `sentinel` in the file.
///
/// Fails with `xml.sentinel_not_found` (file untouched) when the marker is
/// missing, and with an IO error when the file does not exist.
pub fn insert_before<S: AsRef<str>>(
    path: &Path,
    sentinel: &str,
    fragment_lines: &[S],
) -> Result<InsertOutcome> {
    let content = io::read_file(path, "read insertion target")?;

    let updated = splice(&content, sentinel, fragment_lines)
        .ok_or_else(|| Error::sentinel_not_found(path.display().to_string(), sentinel))?;

    match updated {
        None => {
            log_status!("skip", "{} already contains fragment", path.display());
            Ok(InsertOutcome::AlreadyPresent)
        }
        Some(updated) => {
            io::write_file_atomic(path, &updated, "write insertion target")?;
            log_status!("insert", "{} ({} line(s))", path.display(), fragment_lines.len());
            Ok(InsertOutcome::Inserted)
        }
    }
}

/// Compute the new content without touching disk.
///
/// Outer `None`: sentinel missing. Inner `None`: fragment already present.
/// Lines go in front of the sentinel's line; when the sentinel shares its
/// line with other content, the line is split at the sentinel instead.
pub fn splice<S: AsRef<str>>(
    content: &str,
    sentinel: &str,
    fragment_lines: &[S],
) -> Option<Option<String>> {
    let at = content.find(sentinel)?;

    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    if contains_fragment(content, fragment_lines) {
        return Some(None);
    }

    let line_start = content[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let lead = &content[line_start..at];

    let fragment_len: usize = fragment_lines
        .iter()
        .map(|l| l.as_ref().len() + newline.len())
        .sum();
    let mut out = String::with_capacity(content.len() + fragment_len + newline.len());

    let split_at = if lead.trim().is_empty() {
        out.push_str(&content[..line_start]);
        line_start
    } else {
        out.push_str(&content[..at]);
        out.push_str(newline);
        at
    };

    for line in fragment_lines {
        out.push_str(line.as_ref());
        out.push_str(newline);
    }
    out.push_str(&content[split_at..]);

    Some(Some(out))
}

fn contains_fragment<S: AsRef<str>>(content: &str, fragment_lines: &[S]) -> bool {
    let lines: Vec<&str> = fragment_lines.iter().map(AsRef::as_ref).collect();
    content.contains(&lines.join("\n")) || content.contains(&lines.join("\r\n"))
}

/// Escape a value for use inside a double-quoted XML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const UI_PLUGIN: &str = "<plugin xmlns=\"http://www.xebialabs.com/deployit/ui-plugin\">\n</plugin>\n";

    #[test]
    fn inserts_before_sentinel_line() {
        let out = splice(UI_PLUGIN, "</plugin>", &["    <library name=\"a\"/>"])
            .unwrap()
            .unwrap();
        assert_eq!(
            out,
            "<plugin xmlns=\"http://www.xebialabs.com/deployit/ui-plugin\">\n    <library name=\"a\"/>\n</plugin>\n"
        );
    }

    #[test]
    fn indented_sentinel_keeps_its_indentation() {
        let content = "<root>\n  <list>\n  </list>\n</root>\n";
        let out = splice(content, "</list>", &["    <item/>"]).unwrap().unwrap();
        assert_eq!(out, "<root>\n  <list>\n    <item/>\n  </list>\n</root>\n");
    }

    #[test]
    fn sentinel_sharing_a_line_is_split() {
        let out = splice("<plugin></plugin>", "</plugin>", &["<library name=\"a\"/>"])
            .unwrap()
            .unwrap();
        assert_eq!(out, "<plugin>\n<library name=\"a\"/>\n</plugin>");
    }

    #[test]
    fn only_first_sentinel_is_used() {
        let content = "<a>\n</x>\n</x>\n";
        let out = splice(content, "</x>", &["y"]).unwrap().unwrap();
        assert_eq!(out, "<a>\ny\n</x>\n</x>\n");
    }

    #[test]
    fn crlf_files_stay_crlf() {
        let content = "<plugin>\r\n</plugin>\r\n";
        let out = splice(content, "</plugin>", &["<library/>"]).unwrap().unwrap();
        assert_eq!(out, "<plugin>\r\n<library/>\r\n</plugin>\r\n");
    }

    #[test]
    fn present_fragment_is_not_reinserted() {
        let content = "<synthetic>\n<type a=\"1\">\n</type>\n</synthetic>\n";
        assert_eq!(
            splice(content, "</synthetic>", &["<type a=\"1\">", "</type>"]),
            Some(None)
        );
    }

    #[test]
    fn missing_sentinel_is_reported_even_if_fragment_present() {
        assert_eq!(splice("<library/>", "</plugin>", &["<library/>"]), None);
    }

    #[test]
    fn insert_twice_equals_insert_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("xl-ui-plugin.xml");
        fs::write(&path, UI_PLUGIN).unwrap();
        let fragment = ["    <library name=\"xlrelease.jira.jiratask\"/>"];

        assert_eq!(
            insert_before(&path, "</plugin>", &fragment).unwrap(),
            InsertOutcome::Inserted
        );
        let once = fs::read_to_string(&path).unwrap();

        assert_eq!(
            insert_before(&path, "</plugin>", &fragment).unwrap(),
            InsertOutcome::AlreadyPresent
        );
        let twice = fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.matches("xlrelease.jira.jiratask").count(), 1);
    }

    #[test]
    fn missing_sentinel_leaves_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        let original = "<plugin>\n  <library name=\"x\"/>\n";
        fs::write(&path, original).unwrap();

        let err = insert_before(&path, "</plugin>", &["<library name=\"y\"/>"]).unwrap_err();

        assert_eq!(err.code.as_str(), "xml.sentinel_not_found");
        assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.xml");

        let err = insert_before(&path, "</plugin>", &["x"]).unwrap_err();

        assert_eq!(err.code.as_str(), "internal.io_error");
        assert!(!path.exists());
    }

    #[test]
    fn escape_attr_handles_quotes_and_ampersands() {
        assert_eq!(escape_attr("R&D \"Tile\""), "R&amp;D &quot;Tile&quot;");
    }
}
