use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Language tag attached to a candidate artifact by whoever extracted it,
/// usually the info string of a fenced code block. Often missing or wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredLanguage {
    Kotlin,
    Java,
    Xml,
    Unknown,
}

impl DeclaredLanguage {
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "kotlin" | "kt" => Self::Kotlin,
            "java" => Self::Java,
            "xml" => Self::Xml,
            _ => Self::Unknown,
        }
    }
}

/// Immutable input to the engine, constructed once per candidate file.
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
    pub content: String,
    pub declared_language: DeclaredLanguage,
    pub suggested_name: Option<String>,
    pub project_root: PathBuf,
}

impl ArtifactRequest {
    pub fn new(content: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            content: content.into(),
            declared_language: DeclaredLanguage::Unknown,
            suggested_name: None,
            project_root: project_root.into(),
        }
    }

    pub fn with_language(mut self, language: DeclaredLanguage) -> Self {
        self.declared_language = language;
        self
    }

    pub fn with_suggested_name(mut self, name: impl Into<String>) -> Self {
        self.suggested_name = Some(name.into());
        self
    }
}

/// Android resource kind, determined purely from markup content.
/// Selection is order-sensitive; see `ResourceClassifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceCategory {
    Layout,
    Drawable,
    Values,
    Menu,
    Navigation,
    Animation,
    Color,
    Manifest,
    GenericXml,
}

impl ResourceCategory {
    /// Fixed resource sub-directory for this category. The manifest lives at
    /// the project root, so its directory is empty.
    pub fn dir(&self) -> &'static str {
        match self {
            Self::Layout => "res/layout",
            Self::Drawable => "res/drawable",
            Self::Values => "res/values",
            Self::Menu => "res/menu",
            Self::Navigation => "res/navigation",
            Self::Animation => "res/anim",
            Self::Color => "res/color",
            Self::Manifest => "",
            Self::GenericXml => "res/xml",
        }
    }

    /// File name used when the caller did not suggest one.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Layout => "layout.xml",
            Self::Drawable => "drawable.xml",
            Self::Values => "values.xml",
            Self::Menu => "menu.xml",
            Self::Navigation => "nav_graph.xml",
            Self::Animation => "anim.xml",
            Self::Color => "color.xml",
            Self::Manifest => "AndroidManifest.xml",
            Self::GenericXml => "file.xml",
        }
    }
}

/// Surface language/format of a candidate artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    KotlinSource,
    JavaSource,
    XmlResource(ResourceCategory),
    PlainText,
}

impl SurfaceKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::KotlinSource => "kt",
            Self::JavaSource => "java",
            Self::XmlResource(_) => "xml",
            Self::PlainText => "txt",
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self, Self::KotlinSource | Self::JavaSource)
    }
}

/// Classification verdict for one artifact. Derived once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    pub surface_kind: SurfaceKind,
    pub is_android_component: bool,
}

/// Which source-root convention the project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceRoot {
    KotlinTree,
    JavaTree,
}

impl SourceRoot {
    pub fn dir(&self) -> &'static str {
        match self {
            Self::KotlinTree => "src/main/kotlin",
            Self::JavaTree => "src/main/java",
        }
    }

    pub fn is_kotlin(&self) -> bool {
        matches!(self, Self::KotlinTree)
    }
}

/// Root package plus the source-tree convention it was resolved against.
/// Recomputed per call; project layout can change between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub root_package: String,
    pub source_root: SourceRoot,
}

/// Final placement verdict, consumed exactly once by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementDecision {
    pub file_name: String,
    /// Project-relative, `/`-separated, no leading slash, no `..` segments.
    pub directory_path: String,
    pub conflicts_existing: bool,
}

impl PlacementDecision {
    /// Path relative to the project root, as written.
    pub fn relative_path(&self) -> String {
        if self.directory_path.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.directory_path, self.file_name)
        }
    }
}

/// Broad file kind derived from a file name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Kotlin,
    Java,
    Xml,
    Other,
}

impl FileType {
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit('.').next().unwrap_or("").to_lowercase().as_str() {
            "kt" | "kts" => Self::Kotlin,
            "java" => Self::Java,
            "xml" => Self::Xml,
            _ => Self::Other,
        }
    }
}

/// Metadata carried from the caller through to the writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub relative_path: String,
    pub file_name: String,
    pub content: String,
    pub suggested_name: String,
    pub file_type: FileType,
    pub description: String,
}

impl FileMetadata {
    pub fn new(
        relative_path: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
        suggested_name: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        let file_name = file_name.into();
        let suggested_name = suggested_name.unwrap_or_else(|| file_name.clone());
        let file_type = FileType::from_file_name(&file_name);
        Self {
            relative_path: relative_path.into(),
            file_name,
            content: content.into(),
            suggested_name,
            file_type,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_language_parsing() {
        assert_eq!(DeclaredLanguage::parse("kotlin"), DeclaredLanguage::Kotlin);
        assert_eq!(DeclaredLanguage::parse("kt"), DeclaredLanguage::Kotlin);
        assert_eq!(DeclaredLanguage::parse(" Java "), DeclaredLanguage::Java);
        assert_eq!(DeclaredLanguage::parse("XML"), DeclaredLanguage::Xml);
        assert_eq!(DeclaredLanguage::parse("python"), DeclaredLanguage::Unknown);
        assert_eq!(DeclaredLanguage::parse(""), DeclaredLanguage::Unknown);
    }

    #[test]
    fn manifest_category_maps_to_project_root() {
        assert_eq!(ResourceCategory::Manifest.dir(), "");
        assert_eq!(
            ResourceCategory::Manifest.default_file_name(),
            "AndroidManifest.xml"
        );
    }

    #[test]
    fn surface_kind_extensions_are_consistent() {
        assert_eq!(SurfaceKind::KotlinSource.extension(), "kt");
        assert_eq!(SurfaceKind::JavaSource.extension(), "java");
        assert_eq!(
            SurfaceKind::XmlResource(ResourceCategory::Layout).extension(),
            "xml"
        );
        assert!(SurfaceKind::JavaSource.is_source());
        assert!(!SurfaceKind::PlainText.is_source());
    }

    #[test]
    fn source_roots_follow_convention_paths() {
        assert_eq!(SourceRoot::KotlinTree.dir(), "src/main/kotlin");
        assert_eq!(SourceRoot::JavaTree.dir(), "src/main/java");
        assert!(SourceRoot::KotlinTree.is_kotlin());
    }

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_file_name("Main.kt"), FileType::Kotlin);
        assert_eq!(FileType::from_file_name("Main.java"), FileType::Java);
        assert_eq!(FileType::from_file_name("layout.xml"), FileType::Xml);
        assert_eq!(FileType::from_file_name("notes.txt"), FileType::Other);
        assert_eq!(FileType::from_file_name("Makefile"), FileType::Other);
    }

    #[test]
    fn metadata_defaults_suggested_name_to_file_name() {
        let meta = FileMetadata::new(
            "src/main/kotlin/com/acme",
            "LoginViewModel.kt",
            "class LoginViewModel",
            None,
            "generated view model",
        );
        assert_eq!(meta.suggested_name, "LoginViewModel.kt");
        assert_eq!(meta.file_type, FileType::Kotlin);
    }

    #[test]
    fn relative_path_omits_empty_directory() {
        let decision = PlacementDecision {
            file_name: "AndroidManifest.xml".to_string(),
            directory_path: String::new(),
            conflicts_existing: false,
        };
        assert_eq!(decision.relative_path(), "AndroidManifest.xml");
    }
}
