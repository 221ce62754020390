//! Publisher — writes the rendered report pair to the output directory.
//!
//! Both files carry the same timestamp fragment from the run context, so
//! a document can always be paired with its export. Write failure is
//! fatal for the run and propagates; artifact-load failures never reach
//! this layer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Paths written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPaths {
    pub document: PathBuf,
    pub export: PathBuf,
}

/// Write both rendered outputs under timestamp-qualified names.
///
/// Each file is written with a single `std::fs::write`, so a failed run
/// never leaves a truncated output behind for that file.
pub fn publish(
    output_dir: &Path,
    document: &str,
    export_json: &str,
    file_stamp: &str,
) -> Result<PublishedPaths> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory: {}", output_dir.display())
    })?;

    let document_path = output_dir.join(format!("portfolio_analysis_report_{file_stamp}.html"));
    std::fs::write(&document_path, document)
        .with_context(|| format!("failed to write report to {}", document_path.display()))?;

    let export_path = output_dir.join(format!("portfolio_analysis_summary_{file_stamp}.json"));
    std::fs::write(&export_path, export_json)
        .with_context(|| format!("failed to write summary to {}", export_path.display()))?;

    Ok(PublishedPaths {
        document: document_path,
        export: export_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_both_files_with_shared_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");

        let paths = publish(&out, "<html></html>", "{}", "20250801_093000").unwrap();

        assert_eq!(
            paths.document.file_name().unwrap(),
            "portfolio_analysis_report_20250801_093000.html"
        );
        assert_eq!(
            paths.export.file_name().unwrap(),
            "portfolio_analysis_summary_20250801_093000.json"
        );
        assert_eq!(std::fs::read_to_string(&paths.document).unwrap(), "<html></html>");
        assert_eq!(std::fs::read_to_string(&paths.export).unwrap(), "{}");
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        assert!(!out.exists());
        publish(&out, "doc", "{}", "20250801_093000").unwrap();
        assert!(out.exists());
    }

    #[test]
    fn unwritable_destination_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be.
        let blocker = dir.path().join("reports");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = publish(&blocker, "doc", "{}", "20250801_093000").unwrap_err();
        assert!(err.to_string().contains("reports"));
    }
}
