use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::artifact::{
    ArtifactRequest, ClassificationResult, FileMetadata, PackageInfo, PlacementDecision,
    SourceRoot, SurfaceKind,
};
use crate::classify::{
    AndroidSignatureDetector, ContentSniffer, ResourceClassifier, SourceFileNamer,
    SurfaceLanguage,
};
use crate::config::EngineConfig;
use crate::infer::PackageInferencer;
use crate::place::{PlacementGuard, PlacementOutcome};

/// Source-tree directories probed when choosing where generated sources go,
/// most specific first. Kotlin trees are preferred; kotlin is also the
/// default when no tree exists yet.
const SOURCE_TREES: &[(SourceRoot, &str)] = &[
    (SourceRoot::KotlinTree, "app/src/main/kotlin"),
    (SourceRoot::KotlinTree, "src/main/kotlin"),
    (SourceRoot::JavaTree, "app/src/main/java"),
    (SourceRoot::JavaTree, "src/main/java"),
];

const DEFAULT_TREE: (SourceRoot, &str) = (SourceRoot::KotlinTree, "app/src/main/kotlin");

/// Combines sniffing, signature detection, resource classification, naming
/// and package inference into a final (file name, directory) pair. Performs
/// no writes; `PlacementGuard` owns the filesystem mutation.
pub struct PathResolver {
    sniffer: ContentSniffer,
    detector: AndroidSignatureDetector,
    classifier: ResourceClassifier,
    namer: SourceFileNamer,
    inferencer: PackageInferencer,
}

impl PathResolver {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sniffer: ContentSniffer::new(),
            detector: AndroidSignatureDetector::new(config.detection.clone()),
            classifier: ResourceClassifier::new(),
            namer: SourceFileNamer::new(),
            inferencer: PackageInferencer::new(config.inference.clone()),
        }
    }

    /// Classification verdict for a request, without path resolution.
    pub fn classify(&self, request: &ArtifactRequest) -> ClassificationResult {
        let is_android = self.detector.is_android_component(&request.content);
        let surface = self
            .sniffer
            .classify_surface(&request.content, request.declared_language);

        let surface_kind = match surface {
            SurfaceLanguage::Kotlin => SurfaceKind::KotlinSource,
            SurfaceLanguage::Java => SurfaceKind::JavaSource,
            SurfaceLanguage::Xml => {
                SurfaceKind::XmlResource(self.classifier.classify(&request.content))
            }
            // Android signatures in otherwise unclassifiable text bias the
            // verdict toward kotlin source, the project default
            SurfaceLanguage::Plain if is_android => SurfaceKind::KotlinSource,
            SurfaceLanguage::Plain => SurfaceKind::PlainText,
        };

        ClassificationResult {
            surface_kind,
            is_android_component: is_android,
        }
    }

    pub async fn resolve(&self, request: &ArtifactRequest) -> PlacementDecision {
        let classification = self.classify(request);
        let (hint_dir, hint_name) = split_suggestion(request.suggested_name.as_deref());

        let (directory_path, derived_name) = match classification.surface_kind {
            SurfaceKind::XmlResource(category) => {
                let dir = self.classifier.resource_dir(category, hint_dir.as_deref());
                (dir, category.default_file_name().to_string())
            }
            SurfaceKind::KotlinSource | SurfaceKind::JavaSource | SurfaceKind::PlainText => {
                self.resolve_source(request, classification.surface_kind).await
            }
        };

        // Explicit caller intent always beats the derived name
        let file_name = match hint_name {
            Some(name) => ensure_extension(&name, classification.surface_kind.extension()),
            None => derived_name,
        };

        let conflicts_existing = request
            .project_root
            .join(&directory_path)
            .join(&file_name)
            .exists();

        PlacementDecision {
            file_name,
            directory_path,
            conflicts_existing,
        }
    }

    async fn resolve_source(
        &self,
        request: &ArtifactRequest,
        surface_kind: SurfaceKind,
    ) -> (String, String) {
        if surface_kind == SurfaceKind::PlainText {
            // Nothing to anchor plain text to; leave it at the project root
            return (String::new(), "GeneratedFile.txt".to_string());
        }

        let (tree_dir, package) = self.package_info(&request.project_root).await;
        let naming = self.namer.derive_name_and_package(&request.content);

        let mut segments: Vec<&str> = vec![tree_dir];
        let package_path = package.root_package.replace('.', "/");
        if !package_path.is_empty() {
            segments.push(&package_path);
        }
        if !naming.sub_package.is_empty() {
            segments.push(&naming.sub_package);
        }

        let directory = segments.join("/");
        let file_name = format!("{}.{}", naming.class_name, surface_kind.extension());
        (directory, file_name)
    }

    /// Root package and source-tree convention for a project. Recomputed on
    /// every call; the project layout can change between invocations.
    pub async fn package_info(&self, project_root: &Path) -> (&'static str, PackageInfo) {
        let (source_root, tree_dir) = self.select_source_tree(project_root);
        let root_package = self
            .inferencer
            .infer_root_package(project_root, source_root.is_kotlin())
            .await;
        (
            tree_dir,
            PackageInfo {
                root_package,
                source_root,
            },
        )
    }

    fn select_source_tree(&self, project_root: &Path) -> (SourceRoot, &'static str) {
        for (root, dir) in SOURCE_TREES {
            if project_root.join(dir).is_dir() {
                return (*root, dir);
            }
        }
        debug!(
            "no source tree under {}, defaulting to {}",
            project_root.display(),
            DEFAULT_TREE.1
        );
        DEFAULT_TREE
    }
}

/// Splits a suggested name into an optional directory hint and file name.
/// Suggestions with parent-directory segments are discarded outright; a
/// resolved path must never escape the project root.
fn split_suggestion(suggestion: Option<&str>) -> (Option<String>, Option<String>) {
    match suggestion {
        None => (None, None),
        Some(raw) => {
            let trimmed = raw.trim().trim_matches('/');
            if trimmed.is_empty() || trimmed.contains("..") {
                return (None, None);
            }
            match trimmed.rsplit_once('/') {
                Some((dir, name)) => (Some(dir.to_string()), Some(name.to_string())),
                None => (None, Some(trimmed.to_string())),
            }
        }
    }
}

fn ensure_extension(name: &str, extension: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{}.{}", name, extension)
    }
}

/// Facade over the whole pipeline: classify, resolve, then (optionally)
/// place. One engine per project is enough; all state is request-scoped.
pub struct ArtifactEngine {
    resolver: PathResolver,
    guard: PlacementGuard,
}

impl ArtifactEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            resolver: PathResolver::new(&config),
            guard: PlacementGuard::new(),
        }
    }

    pub fn classify(&self, request: &ArtifactRequest) -> ClassificationResult {
        self.resolver.classify(request)
    }

    /// Resolves the target path without writing, for UI confirmation.
    pub async fn resolve(&self, request: &ArtifactRequest) -> PlacementDecision {
        self.resolver.resolve(request).await
    }

    /// Resolves and writes in one step, honoring the no-clobber policy.
    pub async fn place(&self, request: &ArtifactRequest) -> Result<PlacementOutcome> {
        let decision = self.resolver.resolve(request).await;
        let metadata = self.metadata_for(request, &decision);
        self.guard
            .place(&request.project_root, &decision, &metadata.content)
            .await
    }

    /// Metadata handed to callers alongside the outcome, e.g. for
    /// notifications and history.
    pub fn metadata_for(
        &self,
        request: &ArtifactRequest,
        decision: &PlacementDecision,
    ) -> FileMetadata {
        let description = match self.resolver.classify(request).surface_kind {
            SurfaceKind::KotlinSource => "generated Kotlin source",
            SurfaceKind::JavaSource => "generated Java source",
            SurfaceKind::XmlResource(_) => "generated Android resource",
            SurfaceKind::PlainText => "generated text file",
        };
        FileMetadata::new(
            decision.directory_path.clone(),
            decision.file_name.clone(),
            request.content.clone(),
            request.suggested_name.clone(),
            description,
        )
    }
}

impl Default for ArtifactEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
