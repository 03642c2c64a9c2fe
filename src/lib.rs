//! Classifies generated code and resource artifacts and resolves where they
//! belong in a conventional Android/Kotlin project tree, without executing
//! or parsing the code. Classification is a pure function of the text; the
//! placement guard is the only component that writes.

pub mod artifact;
pub mod classify;
pub mod config;
pub mod infer;
pub mod place;
pub mod resolve;

// Re-export commonly used types
pub use artifact::{
    ArtifactRequest, ClassificationResult, DeclaredLanguage, FileMetadata, FileType,
    PackageInfo, PlacementDecision, ResourceCategory, SourceRoot, SurfaceKind,
};
pub use classify::{AndroidSignatureDetector, ContentSniffer, ResourceClassifier, SourceFileNamer};
pub use config::EngineConfig;
pub use infer::PackageInferencer;
pub use place::{PlacementGuard, PlacementOutcome};
pub use resolve::{ArtifactEngine, PathResolver};
