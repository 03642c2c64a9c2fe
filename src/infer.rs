use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::InferenceConfig;

const BUILD_FILES: &[&str] = &[
    "app/build.gradle.kts",
    "build.gradle.kts",
    "app/build.gradle",
    "build.gradle",
];

const MANIFEST_FILES: &[&str] = &[
    "app/src/main/AndroidManifest.xml",
    "src/main/AndroidManifest.xml",
];

/// Determines the project's root package by probing build configuration,
/// the manifest, and existing sources, in that order. Every probe failure
/// counts as "no signal" and the chain falls through to a synthetic
/// fallback, so inference always produces a non-empty package name.
pub struct PackageInferencer {
    config: InferenceConfig,
    namespace_kts: Regex,
    namespace_groovy: Regex,
    application_id_kts: Regex,
    application_id_groovy: Regex,
    manifest_package: Regex,
    package_statement: Regex,
}

impl PackageInferencer {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            namespace_kts: Regex::new(r#"namespace\s*=\s*"([^"]+)""#)
                .expect("namespace pattern is valid"),
            namespace_groovy: Regex::new(r#"namespace\s+['"]([^'"]+)['"]"#)
                .expect("groovy namespace pattern is valid"),
            application_id_kts: Regex::new(r#"applicationId\s*=\s*"([^"]+)""#)
                .expect("applicationId pattern is valid"),
            application_id_groovy: Regex::new(r#"applicationId\s+['"]([^'"]+)['"]"#)
                .expect("groovy applicationId pattern is valid"),
            manifest_package: Regex::new(r#"package\s*=\s*"([^"]+)""#)
                .expect("manifest package pattern is valid"),
            package_statement: Regex::new(r"(?m)^\s*package\s+([A-Za-z_][A-Za-z0-9_.]*)")
                .expect("package statement pattern is valid"),
        }
    }

    pub async fn infer_root_package(&self, project_root: &Path, is_kotlin: bool) -> String {
        if let Some(package) = self.from_build_files(project_root) {
            return package;
        }
        if let Some(package) = self.from_manifest(project_root) {
            return package;
        }
        if let Some(package) = self.from_source_tree(project_root, is_kotlin) {
            return package;
        }
        self.synthetic_fallback(project_root)
    }

    fn from_build_files(&self, project_root: &Path) -> Option<String> {
        for candidate in BUILD_FILES {
            let path = project_root.join(candidate);
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("build file {} not readable: {}", path.display(), e);
                    continue;
                }
            };

            // namespace takes precedence over applicationId within a file
            let package = self
                .capture(&self.namespace_kts, &content)
                .or_else(|| self.capture(&self.namespace_groovy, &content))
                .or_else(|| self.capture(&self.application_id_kts, &content))
                .or_else(|| self.capture(&self.application_id_groovy, &content));
            if package.is_some() {
                return package;
            }
        }
        None
    }

    fn from_manifest(&self, project_root: &Path) -> Option<String> {
        for candidate in MANIFEST_FILES {
            let path = project_root.join(candidate);
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("manifest {} not readable: {}", path.display(), e);
                    continue;
                }
            };
            if let Some(package) = self.capture(&self.manifest_package, &content) {
                return Some(package);
            }
        }
        None
    }

    fn from_source_tree(&self, project_root: &Path, is_kotlin: bool) -> Option<String> {
        let tree = if is_kotlin {
            ["app/src/main/kotlin", "src/main/kotlin"]
        } else {
            ["app/src/main/java", "src/main/java"]
        };
        let root = tree
            .iter()
            .map(|dir| project_root.join(dir))
            .find(|path| path.is_dir())?;

        let sources = self.collect_sources(&root);

        // Entry-point files first: they sit at the package root and name it
        for path in &sources {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if self
                .config
                .entry_point_names
                .iter()
                .any(|name| stem.ends_with(name.as_str()))
            {
                if let Some(package) = self.package_of(path) {
                    return Some(package);
                }
            }
        }

        // Otherwise consult the first few files in traversal order
        for path in sources.iter().take(self.config.source_scan_limit) {
            if let Some(package) = self.package_of(path) {
                return Some(package);
            }
        }

        None
    }

    fn collect_sources(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("source walk error under {}: {}", root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("kt") | Some("java")
                )
            })
            .collect()
    }

    fn package_of(&self, path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => self.capture(&self.package_statement, &content),
            Err(e) => {
                debug!("source file {} not readable: {}", path.display(), e);
                None
            }
        }
    }

    fn capture(&self, pattern: &Regex, content: &str) -> Option<String> {
        pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn synthetic_fallback(&self, project_root: &Path) -> String {
        let sanitized: String = project_root
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        let dir_name = if sanitized.is_empty() { "app".to_string() } else { sanitized };
        format!("com.example.{}", dir_name)
    }
}
