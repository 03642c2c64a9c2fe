use crate::artifact::DeclaredLanguage;

mod android;
mod naming;
mod resource;

pub use android::AndroidSignatureDetector;
pub use naming::{NameDecision, SourceFileNamer};
pub use resource::ResourceClassifier;

/// Surface language of a raw text blob, before resource categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceLanguage {
    Kotlin,
    Java,
    Xml,
    Plain,
}

/// Decides the surface language/format of raw text. The declared language
/// from the caller is trusted when it names a concrete language; structural
/// sniffing is the fallback, since fenced blocks frequently arrive with no
/// tag or a wrong one.
pub struct ContentSniffer;

impl ContentSniffer {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_surface(&self, content: &str, declared: DeclaredLanguage) -> SurfaceLanguage {
        match declared {
            DeclaredLanguage::Kotlin => return SurfaceLanguage::Kotlin,
            DeclaredLanguage::Java => return SurfaceLanguage::Java,
            DeclaredLanguage::Xml => return SurfaceLanguage::Xml,
            DeclaredLanguage::Unknown => {}
        }

        if self.looks_like_xml(content) {
            SurfaceLanguage::Xml
        } else if self.has_source_declaration(content) {
            if self.looks_like_java(content) {
                SurfaceLanguage::Java
            } else {
                SurfaceLanguage::Kotlin
            }
        } else {
            SurfaceLanguage::Plain
        }
    }

    fn looks_like_xml(&self, content: &str) -> bool {
        let trimmed = content.trim_start();
        if trimmed.starts_with("<?xml") {
            return true;
        }
        if !trimmed.contains('<') {
            return false;
        }
        // Android markup almost always carries namespaced attributes
        if trimmed.contains("xmlns:") || trimmed.contains("android:") || trimmed.contains("app:") {
            return true;
        }
        // Generic <tag attr="..."> shape
        trimmed
            .split('<')
            .skip(1)
            .any(|chunk| chunk.split('>').next().map_or(false, |tag| tag.contains("=\"")))
    }

    fn has_source_declaration(&self, content: &str) -> bool {
        ["class ", "interface ", "object ", "fun ", "enum class "]
            .iter()
            .any(|kw| content.contains(kw))
    }

    fn looks_like_java(&self, content: &str) -> bool {
        // Kotlin-only shapes settle it immediately
        let kotlin_markers = ["fun ", "val ", "var ", "object ", "companion object"];
        if kotlin_markers.iter().any(|m| content.contains(m)) {
            return false;
        }

        content.contains("System.out.")
            || content.contains("public static void main")
            || ((content.contains("public class") || content.contains("public interface"))
                && content.contains(';'))
            || (content.contains("package ") && content.contains("import ") && content.contains(';'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_language_is_trusted() {
        let sniffer = ContentSniffer::new();
        // The tag wins even when the content looks like something else
        assert_eq!(
            sniffer.classify_surface("<resources></resources>", DeclaredLanguage::Kotlin),
            SurfaceLanguage::Kotlin
        );
        assert_eq!(
            sniffer.classify_surface("class Foo", DeclaredLanguage::Xml),
            SurfaceLanguage::Xml
        );
    }

    #[test]
    fn sniffs_xml_from_prolog() {
        let sniffer = ContentSniffer::new();
        let content = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources/>";
        assert_eq!(
            sniffer.classify_surface(content, DeclaredLanguage::Unknown),
            SurfaceLanguage::Xml
        );
    }

    #[test]
    fn sniffs_xml_from_namespaced_attributes() {
        let sniffer = ContentSniffer::new();
        let content = "<LinearLayout android:layout_width=\"match_parent\"/>";
        assert_eq!(
            sniffer.classify_surface(content, DeclaredLanguage::Unknown),
            SurfaceLanguage::Xml
        );
    }

    #[test]
    fn sniffs_kotlin_source() {
        let sniffer = ContentSniffer::new();
        let content = "class LoginViewModel : ViewModel() {\n    fun login() {}\n}";
        assert_eq!(
            sniffer.classify_surface(content, DeclaredLanguage::Unknown),
            SurfaceLanguage::Kotlin
        );
    }

    #[test]
    fn sniffs_java_source() {
        let sniffer = ContentSniffer::new();
        let content = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"hi\");\n    }\n}";
        assert_eq!(
            sniffer.classify_surface(content, DeclaredLanguage::Unknown),
            SurfaceLanguage::Java
        );
    }

    #[test]
    fn ambiguous_declaration_defaults_to_kotlin() {
        let sniffer = ContentSniffer::new();
        assert_eq!(
            sniffer.classify_surface("class Thing { }", DeclaredLanguage::Unknown),
            SurfaceLanguage::Kotlin
        );
    }

    #[test]
    fn prose_is_plain_text() {
        let sniffer = ContentSniffer::new();
        assert_eq!(
            sniffer.classify_surface("Here is how you set up Gradle.", DeclaredLanguage::Unknown),
            SurfaceLanguage::Plain
        );
        assert_eq!(
            sniffer.classify_surface("", DeclaredLanguage::Unknown),
            SurfaceLanguage::Plain
        );
    }
}
