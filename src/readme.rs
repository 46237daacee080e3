use std::fs;
use std::ops::Range;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Error;

pub const MARKER_START: &str = "<!-- CF-STATS:START -->";
pub const MARKER_END: &str = "<!-- CF-STATS:END -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    Write,
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The region was replaced and the file rewritten.
    Updated,
    /// The region already held the fragment; nothing was written.
    Unchanged,
    /// Dry run: the document as it would have been written.
    Preview(String),
    /// No marker pair; the file was left untouched.
    RegionNotFound,
}

/// Byte range of the first marker pair, markers included.
pub fn find_region(content: &str) -> Option<Range<usize>> {
    let start = content.find(MARKER_START)?;
    let body_start = start + MARKER_START.len();
    let end = content[body_start..].find(MARKER_END)? + body_start;
    Some(start..end + MARKER_END.len())
}

/// Replaces the body of the first marker region with `fragment`.
pub fn splice(content: &str, fragment: &str) -> Option<String> {
    let region = find_region(content)?;

    let mut output = String::with_capacity(content.len() + fragment.len());
    output.push_str(&content[..region.start]);
    output.push_str(MARKER_START);
    output.push('\n');
    output.push_str(fragment);
    output.push('\n');
    output.push_str(MARKER_END);
    output.push_str(&content[region.end..]);
    Some(output)
}

pub fn patch_file(path: &Path, fragment: &str, mode: PatchMode) -> Result<PatchOutcome, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(patched) = splice(&content, fragment) else {
        warn!(action = "patch", component = "readme", file_path = ?path, "Stats markers not found");
        return Ok(PatchOutcome::RegionNotFound);
    };

    if mode == PatchMode::DryRun {
        return Ok(PatchOutcome::Preview(patched));
    }

    if patched == content {
        info!(action = "patch", component = "readme", file_path = ?path, "Stats block already up to date");
        return Ok(PatchOutcome::Unchanged);
    }

    fs::write(path, &patched).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(action = "complete", component = "readme", file_path = ?path, bytes = patched.len(), "Stats block rewritten");
    Ok(PatchOutcome::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "A\n<!-- CF-STATS:START -->\nold\n<!-- CF-STATS:END -->\nB";

    #[test]
    fn finds_first_region() {
        let region = find_region(DOC).unwrap();
        assert_eq!(region.start, 2);
        assert!(DOC[region.clone()].starts_with(MARKER_START));
        assert!(DOC[region].ends_with(MARKER_END));
    }

    #[test]
    fn replaces_only_the_body() {
        let patched = splice(DOC, "new").unwrap();
        assert_eq!(
            patched,
            "A\n<!-- CF-STATS:START -->\nnew\n<!-- CF-STATS:END -->\nB"
        );
    }

    #[test]
    fn splicing_is_idempotent() {
        let once = splice(DOC, "<table>\n</table>").unwrap();
        let twice = splice(&once, "<table>\n</table>").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_markers_yield_none() {
        assert_eq!(splice("no markers here", "x"), None);
        assert_eq!(splice("<!-- CF-STATS:START -->\nunterminated", "x"), None);
        assert_eq!(splice("<!-- CF-STATS:END -->\n<!-- CF-STATS:START -->", "x"), None);
    }

    #[test]
    fn only_first_pair_is_replaced() {
        let doc = format!("{DOC}\n{DOC}");
        let patched = splice(&doc, "new").unwrap();
        assert_eq!(
            patched,
            "A\n<!-- CF-STATS:START -->\nnew\n<!-- CF-STATS:END -->\nB\n\
             A\n<!-- CF-STATS:START -->\nold\n<!-- CF-STATS:END -->\nB"
        );
    }

    #[test]
    fn adjacent_markers_are_a_region() {
        let patched = splice("<!-- CF-STATS:START --><!-- CF-STATS:END -->", "x").unwrap();
        assert_eq!(patched, "<!-- CF-STATS:START -->\nx\n<!-- CF-STATS:END -->");
    }

    #[test]
    fn patch_file_rewrites_then_reports_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, DOC).unwrap();

        assert_eq!(patch_file(&path, "new", PatchMode::Write).unwrap(), PatchOutcome::Updated);
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.contains("\nnew\n"));

        assert_eq!(patch_file(&path, "new", PatchMode::Write).unwrap(), PatchOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn patch_file_leaves_unmarked_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Project\n\nNo stats yet.\n").unwrap();

        assert_eq!(
            patch_file(&path, "new", PatchMode::Write).unwrap(),
            PatchOutcome::RegionNotFound
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Project\n\nNo stats yet.\n");
    }

    #[test]
    fn dry_run_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, DOC).unwrap();

        match patch_file(&path, "new", PatchMode::DryRun).unwrap() {
            PatchOutcome::Preview(content) => assert!(content.contains("\nnew\n")),
            other => panic!("expected preview, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), DOC);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch_file(&dir.path().join("missing.md"), "x", PatchMode::Write).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
