use regex::Regex;

/// Derived class/file name plus the architectural sub-package it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDecision {
    pub sub_package: String,
    pub class_name: String,
}

struct SupertypeRule {
    marker: &'static str,
    sub_package: &'static str,
    canonical_suffix: &'static str,
}

struct SuffixRule {
    suffix: &'static str,
    sub_package: &'static str,
    /// Additional marker that must appear somewhere in the text for the rule
    /// to apply. Keeps `Component` from firing on non-DI classes.
    guard: Option<&'static str>,
}

/// Derives a class name and sub-package from declarations in source text.
///
/// Rules run strongest-signal first: an explicit `@Composable` function,
/// then an explicit supertype, then a name-suffix guess, then a placeholder.
/// Every input produces some decision; there is no error path.
pub struct SourceFileNamer {
    composable_fn: Regex,
    kotlin_supertype: Regex,
    java_supertype: Regex,
    bare_declaration: Regex,
    supertype_rules: Vec<SupertypeRule>,
    suffix_rules: Vec<SuffixRule>,
}

impl SourceFileNamer {
    pub fn new() -> Self {
        Self {
            composable_fn: Regex::new(
                r"@Composable\s*(?:\r?\n\s*)*(?:(?:public|private|internal)\s+)?fun\s+([A-Za-z_]\w*)",
            )
            .expect("composable pattern is valid"),
            kotlin_supertype: Regex::new(
                r"(?:class|object)\s+([A-Za-z_]\w*)(?:<[^>]*>)?\s*(?:\([^)]*\))?\s*:\s*([A-Za-z_][\w.]*)",
            )
            .expect("kotlin supertype pattern is valid"),
            java_supertype: Regex::new(r"class\s+([A-Za-z_]\w*)(?:<[^>]*>)?\s+extends\s+([A-Za-z_][\w.]*)")
                .expect("java supertype pattern is valid"),
            bare_declaration: Regex::new(r"(?:class|interface|object)\s+([A-Za-z_]\w*)")
                .expect("declaration pattern is valid"),
            supertype_rules: vec![
                SupertypeRule { marker: "ViewModel", sub_package: "ui/viewmodels", canonical_suffix: "ViewModel" },
                SupertypeRule { marker: "Activity", sub_package: "ui/activities", canonical_suffix: "Activity" },
                SupertypeRule { marker: "Fragment", sub_package: "ui/fragments", canonical_suffix: "Fragment" },
                SupertypeRule { marker: "Adapter", sub_package: "ui/adapters", canonical_suffix: "Adapter" },
                SupertypeRule { marker: "Repository", sub_package: "data/repositories", canonical_suffix: "Repository" },
                SupertypeRule { marker: "DataSource", sub_package: "data/sources", canonical_suffix: "DataSource" },
            ],
            suffix_rules: vec![
                SuffixRule { suffix: "Activity", sub_package: "ui/activities", guard: None },
                SuffixRule { suffix: "Fragment", sub_package: "ui/fragments", guard: None },
                SuffixRule { suffix: "Dialog", sub_package: "ui/dialogs", guard: None },
                SuffixRule { suffix: "BottomSheet", sub_package: "ui/dialogs", guard: None },
                SuffixRule { suffix: "ViewModel", sub_package: "ui/viewmodels", guard: None },
                SuffixRule { suffix: "ViewHolder", sub_package: "ui/adapters", guard: None },
                SuffixRule { suffix: "Adapter", sub_package: "ui/adapters", guard: None },
                SuffixRule { suffix: "Repository", sub_package: "data/repositories", guard: None },
                SuffixRule { suffix: "DataSource", sub_package: "data/sources", guard: None },
                SuffixRule { suffix: "Database", sub_package: "data/database", guard: None },
                SuffixRule { suffix: "Dao", sub_package: "data/database", guard: None },
                SuffixRule { suffix: "Entity", sub_package: "data/entities", guard: None },
                SuffixRule { suffix: "UseCase", sub_package: "domain/usecases", guard: None },
                SuffixRule { suffix: "Interactor", sub_package: "domain/usecases", guard: None },
                SuffixRule { suffix: "Interceptor", sub_package: "data/network", guard: None },
                SuffixRule { suffix: "Client", sub_package: "data/network", guard: None },
                SuffixRule { suffix: "Api", sub_package: "data/network", guard: None },
                SuffixRule { suffix: "Service", sub_package: "data/network", guard: None },
                SuffixRule { suffix: "Module", sub_package: "di", guard: None },
                SuffixRule { suffix: "Component", sub_package: "di", guard: Some("@Component") },
                SuffixRule { suffix: "Qualifier", sub_package: "di", guard: None },
                SuffixRule { suffix: "Dto", sub_package: "data/models", guard: None },
                // ViewModel is matched above, so a bare Model suffix is safe here
                SuffixRule { suffix: "Model", sub_package: "data/models", guard: None },
                SuffixRule { suffix: "Utils", sub_package: "utils", guard: None },
                SuffixRule { suffix: "Util", sub_package: "utils", guard: None },
                SuffixRule { suffix: "Helper", sub_package: "utils", guard: None },
                SuffixRule { suffix: "Manager", sub_package: "utils", guard: None },
                SuffixRule { suffix: "Provider", sub_package: "utils", guard: None },
                SuffixRule { suffix: "Factory", sub_package: "utils", guard: None },
                SuffixRule { suffix: "Constants", sub_package: "utils", guard: None },
            ],
        }
    }

    pub fn derive_name_and_package(&self, content: &str) -> NameDecision {
        if let Some(decision) = self.from_composable(content) {
            return decision;
        }
        if let Some(decision) = self.from_supertype(content) {
            return decision;
        }
        if let Some(decision) = self.from_bare_declaration(content) {
            return decision;
        }
        NameDecision {
            sub_package: String::new(),
            class_name: "GeneratedFile".to_string(),
        }
    }

    fn from_composable(&self, content: &str) -> Option<NameDecision> {
        let captures = self.composable_fn.captures(content)?;
        let name = captures.get(1)?.as_str();
        let class_name = if name.ends_with("Screen") {
            name.to_string()
        } else {
            format!("{}Screen", name)
        };
        Some(NameDecision {
            sub_package: "ui/compose/screens".to_string(),
            class_name,
        })
    }

    fn from_supertype(&self, content: &str) -> Option<NameDecision> {
        let (name, supertype) = self
            .kotlin_supertype
            .captures(content)
            .or_else(|| self.java_supertype.captures(content))
            .and_then(|caps| {
                Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
            })?;

        for rule in &self.supertype_rules {
            if supertype.contains(rule.marker) {
                let class_name = if name.ends_with(rule.canonical_suffix) {
                    name
                } else {
                    format!("{}{}", name, rule.canonical_suffix)
                };
                return Some(NameDecision {
                    sub_package: rule.sub_package.to_string(),
                    class_name,
                });
            }
        }

        // Unknown supertype: keep the declared name, no sub-package
        Some(NameDecision {
            sub_package: String::new(),
            class_name: name,
        })
    }

    fn from_bare_declaration(&self, content: &str) -> Option<NameDecision> {
        let captures = self.bare_declaration.captures(content)?;
        let name = captures.get(1)?.as_str().to_string();

        for rule in &self.suffix_rules {
            if !name.ends_with(rule.suffix) {
                continue;
            }
            if let Some(guard) = rule.guard {
                if !content.contains(guard) {
                    continue;
                }
            }
            return Some(NameDecision {
                sub_package: rule.sub_package.to_string(),
                class_name: name,
            });
        }

        Some(NameDecision {
            sub_package: String::new(),
            class_name: name,
        })
    }
}

impl Default for SourceFileNamer {
    fn default() -> Self {
        Self::new()
    }
}
