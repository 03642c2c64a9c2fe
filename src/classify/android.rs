use crate::config::DetectionConfig;

/// Flags source text as Android platform code by scanning for a closed set
/// of framework signatures. A deliberate OR of independent weak signals:
/// false positives only bias naming and default-extension choices, so
/// sensitivity is preferred over precision.
pub struct AndroidSignatureDetector {
    catalog: DetectionConfig,
}

impl AndroidSignatureDetector {
    pub fn new(catalog: DetectionConfig) -> Self {
        Self { catalog }
    }

    pub fn is_android_component(&self, content: &str) -> bool {
        self.has_framework_supertype(content)
            || self.has_android_annotation(content)
            || self.has_android_import(content)
            || self.has_lifecycle_method(content)
    }

    fn has_framework_supertype(&self, content: &str) -> bool {
        self.catalog.base_types.iter().any(|base| {
            // Java explicit-inheritance syntax
            content.contains(&format!("extends {}", base))
                || content.contains(&format!("implements {}", base))
                // Kotlin colon-style supertype syntax
                || content.contains(&format!(": {}(", base))
                || content.contains(&format!(": {} ", base))
                || content.contains(&format!(": {}<", base))
        })
    }

    fn has_android_annotation(&self, content: &str) -> bool {
        self.catalog
            .annotations
            .iter()
            .any(|annotation| content.contains(annotation.as_str()))
    }

    fn has_android_import(&self, content: &str) -> bool {
        self.catalog
            .import_prefixes
            .iter()
            .any(|prefix| content.contains(prefix.as_str()))
    }

    fn has_lifecycle_method(&self, content: &str) -> bool {
        self.catalog.lifecycle_methods.iter().any(|method| {
            content.contains(&format!("fun {}(", method))
                || content.contains(&format!("void {}(", method))
                || content.contains(&format!("override fun {}(", method))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> AndroidSignatureDetector {
        AndroidSignatureDetector::new(DetectionConfig::default())
    }

    #[test]
    fn detects_kotlin_supertype() {
        let content = "class LoginActivity : AppCompatActivity() { }";
        assert!(detector().is_android_component(content));
    }

    #[test]
    fn detects_java_extends() {
        let content = "public class MainActivity extends Activity { }";
        assert!(detector().is_android_component(content));
    }

    #[test]
    fn detects_androidx_import() {
        let content = "import androidx.lifecycle.ViewModel\n\nclass Something";
        assert!(detector().is_android_component(content));
    }

    #[test]
    fn detects_lifecycle_override() {
        let content = "override fun onCreate(savedInstanceState: Bundle?) { }";
        assert!(detector().is_android_component(content));
    }

    #[test]
    fn detects_compose_annotation() {
        let content = "@Composable\nfun Greeting(name: String) { }";
        assert!(detector().is_android_component(content));
    }

    #[test]
    fn plain_kotlin_is_not_android() {
        let content = "class Calculator {\n    fun add(a: Int, b: Int) = a + b\n}";
        assert!(!detector().is_android_component(content));
    }

    #[test]
    fn synthetic_catalog_is_honored() {
        let catalog = DetectionConfig {
            base_types: vec!["SyntheticBase".to_string()],
            annotations: vec![],
            import_prefixes: vec![],
            lifecycle_methods: vec![],
        };
        let detector = AndroidSignatureDetector::new(catalog);
        assert!(detector.is_android_component("class X : SyntheticBase() {}"));
        assert!(!detector.is_android_component("class LoginActivity : AppCompatActivity() {}"));
    }
}
