use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::artifact::PlacementDecision;

/// Bare tokens the content source sometimes prepends as a first line. They
/// are metadata from the fenced block, not code, and are stripped on write.
const LANGUAGE_MARKERS: &[&str] = &["kotlin", "kt", "java", "xml", "json", "groovy", "gradle"];

/// Outcome of a placement. The error arm of `Result` carries the
/// failed-placement case (directory creation or write errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Written(PathBuf),
    SkippedExisting(PathBuf),
}

/// Sole writer in the pipeline. Ensures the target directory, re-checks for
/// an existing file, and writes the content in a single operation. The
/// check-then-write sequence is serialized through an internal lock so two
/// placements racing for the same path cannot both pass the existence check.
pub struct PlacementGuard {
    write_lock: Mutex<()>,
}

impl PlacementGuard {
    pub fn new() -> Self {
        Self {
            write_lock: Mutex::new(()),
        }
    }

    pub async fn place(
        &self,
        project_root: &Path,
        decision: &PlacementDecision,
        content: &str,
    ) -> Result<PlacementOutcome> {
        let target_dir = project_root.join(&decision.directory_path);
        let target_file = target_dir.join(&decision.file_name);

        // A decision already flagged as conflicting is never written
        if decision.conflicts_existing {
            debug!("placement skipped, conflict flagged: {}", target_file.display());
            return Ok(PlacementOutcome::SkippedExisting(target_file));
        }

        let _guard = self.write_lock.lock().await;

        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("failed to create directory {}", target_dir.display()))?;

        if target_file.exists() {
            debug!("placement skipped, file exists: {}", target_file.display());
            return Ok(PlacementOutcome::SkippedExisting(target_file));
        }

        let cleaned = strip_language_marker(content);
        std::fs::write(&target_file, cleaned)
            .with_context(|| format!("failed to write {}", target_file.display()))?;

        Ok(PlacementOutcome::Written(target_file))
    }
}

impl Default for PlacementGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops a leading line that is exactly a bare language token. Anything
/// else on the first line, including dotted names like `kotlin.math`, is
/// real content and stays.
fn strip_language_marker(content: &str) -> &str {
    let Some((first_line, rest)) = content.split_once('\n') else {
        return content;
    };
    let token = first_line.trim().to_lowercase();
    if LANGUAGE_MARKERS.contains(&token.as_str()) {
        rest
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn decision(dir: &str, file: &str) -> PlacementDecision {
        PlacementDecision {
            file_name: file.to_string(),
            directory_path: dir.to_string(),
            conflicts_existing: false,
        }
    }

    #[tokio::test]
    async fn writes_content_and_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let guard = PlacementGuard::new();
        let decision = decision("app/src/main/res/layout", "activity_login.xml");

        let outcome = guard
            .place(temp_dir.path(), &decision, "<LinearLayout/>")
            .await
            .unwrap();

        let expected = temp_dir
            .path()
            .join("app/src/main/res/layout/activity_login.xml");
        assert_eq!(outcome, PlacementOutcome::Written(expected.clone()));
        assert_eq!(fs::read_to_string(expected).unwrap(), "<LinearLayout/>");
    }

    #[tokio::test]
    async fn existing_file_is_never_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let guard = PlacementGuard::new();
        let decision = decision("", "Main.kt");

        guard
            .place(temp_dir.path(), &decision, "original content")
            .await
            .unwrap();
        let outcome = guard
            .place(temp_dir.path(), &decision, "replacement content")
            .await
            .unwrap();

        assert!(matches!(outcome, PlacementOutcome::SkippedExisting(_)));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Main.kt")).unwrap(),
            "original content"
        );
    }

    #[tokio::test]
    async fn flagged_conflict_short_circuits() {
        let temp_dir = TempDir::new().unwrap();
        let guard = PlacementGuard::new();
        let mut decision = decision("", "Flagged.kt");
        decision.conflicts_existing = true;

        let outcome = guard
            .place(temp_dir.path(), &decision, "content")
            .await
            .unwrap();
        assert!(matches!(outcome, PlacementOutcome::SkippedExisting(_)));
        assert!(!temp_dir.path().join("Flagged.kt").exists());
    }

    #[tokio::test]
    async fn leading_language_marker_is_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let guard = PlacementGuard::new();
        let decision = decision("", "Login.kt");

        guard
            .place(temp_dir.path(), &decision, "kotlin\nclass Login { }")
            .await
            .unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Login.kt")).unwrap(),
            "class Login { }"
        );
    }

    #[tokio::test]
    async fn first_line_of_real_code_is_retained() {
        let temp_dir = TempDir::new().unwrap();
        let guard = PlacementGuard::new();
        let decision = decision("", "Math.kt");
        let content = "import kotlin.math.abs\nval x = abs(-1)";

        guard.place(temp_dir.path(), &decision, content).await.unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Math.kt")).unwrap(),
            content
        );
    }

    #[tokio::test]
    async fn single_line_content_without_newline_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let guard = PlacementGuard::new();
        let decision = decision("", "note.txt");

        guard.place(temp_dir.path(), &decision, "xml").await.unwrap();
        // no newline, so the lone token is the whole content, not a marker
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("note.txt")).unwrap(),
            "xml"
        );
    }

    #[tokio::test]
    async fn concurrent_placements_write_exactly_once() {
        let temp_dir = TempDir::new().unwrap();
        let guard = Arc::new(PlacementGuard::new());
        let root = temp_dir.path().to_path_buf();

        let mut handles = Vec::new();
        for i in 0..2 {
            let guard = Arc::clone(&guard);
            let root = root.clone();
            handles.push(tokio::spawn(async move {
                let decision = PlacementDecision {
                    file_name: "Racy.kt".to_string(),
                    directory_path: String::new(),
                    conflicts_existing: false,
                };
                guard
                    .place(&root, &decision, &format!("writer {}", i))
                    .await
                    .unwrap()
            }));
        }

        let mut written = 0;
        let mut skipped = 0;
        for handle in handles {
            match handle.await.unwrap() {
                PlacementOutcome::Written(_) => written += 1,
                PlacementOutcome::SkippedExisting(_) => skipped += 1,
            }
        }
        assert_eq!((written, skipped), (1, 1));
    }
}
