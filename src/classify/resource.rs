use crate::artifact::ResourceCategory;

/// Classifies XML-like content into one Android resource category.
///
/// Categories overlap — a `<selector>` can be a standalone drawable while a
/// layout also nests views that look like drawables — so the rules form an
/// ordered decision list and the first match wins. Manifest markers are
/// checked first: a manifest embeds `<application>`/`<activity>` blocks that
/// would otherwise match later rules.
pub struct ResourceClassifier {
    rules: Vec<CategoryRule>,
}

struct CategoryRule {
    category: ResourceCategory,
    matches: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

const LAYOUT_ROOT_TAGS: &[&str] = &[
    "<LinearLayout",
    "<RelativeLayout",
    "<FrameLayout",
    "<ConstraintLayout",
    "<androidx.constraintlayout.widget.ConstraintLayout",
    "<CoordinatorLayout",
    "<androidx.coordinatorlayout.widget.CoordinatorLayout",
    "<DrawerLayout",
    "<androidx.drawerlayout.widget.DrawerLayout",
    "<SwipeRefreshLayout",
    "<androidx.swiperefreshlayout.widget.SwipeRefreshLayout",
];

/// True when the content carries any layout-like tag or sizing attribute.
/// Used to suppress the Color and Values rules for embedded references.
fn has_layout_tags(content: &str) -> bool {
    LAYOUT_ROOT_TAGS.iter().any(|tag| content.contains(tag))
        || (content.contains('<') && content.contains("layout_width"))
}

impl ResourceClassifier {
    pub fn new() -> Self {
        let rules: Vec<CategoryRule> = vec![
            CategoryRule {
                category: ResourceCategory::Manifest,
                matches: Box::new(|c| {
                    ["<manifest", "<application", "<activity", "<service", "<receiver", "<provider"]
                        .iter()
                        .any(|tag| c.contains(tag))
                }),
            },
            CategoryRule {
                category: ResourceCategory::Layout,
                matches: Box::new(has_layout_tags),
            },
            CategoryRule {
                category: ResourceCategory::Navigation,
                matches: Box::new(|c| {
                    c.contains("<navigation")
                        || (c.contains("<fragment") && c.contains("name="))
                }),
            },
            CategoryRule {
                category: ResourceCategory::Menu,
                matches: Box::new(|c| {
                    c.contains("<menu")
                        || (c.contains("<item")
                            && (c.contains("menuCategory") || c.contains("showAsAction")))
                }),
            },
            CategoryRule {
                category: ResourceCategory::Animation,
                matches: Box::new(|c| {
                    c.contains("<animator")
                        || c.contains("<objectAnimator")
                        || (c.contains("<set") && c.contains("interpolator"))
                }),
            },
            CategoryRule {
                category: ResourceCategory::Drawable,
                matches: Box::new(|c| {
                    [
                        "<vector", "<shape", "<selector", "<ripple", "<inset", "<bitmap",
                        "<nine-patch", "<layer-list",
                    ]
                    .iter()
                    .any(|tag| c.contains(tag))
                        || c.contains("android:drawable")
                }),
            },
            CategoryRule {
                category: ResourceCategory::Color,
                matches: Box::new(|c| {
                    (c.contains("<color") || c.contains("android:color="))
                        && !has_layout_tags(c)
                }),
            },
            CategoryRule {
                category: ResourceCategory::Values,
                matches: Box::new(|c| {
                    [
                        "<resources", "<string", "<dimen", "<style", "<declare-styleable",
                        "<integer", "<bool", "<array", "<plurals", "<attr",
                    ]
                    .iter()
                    .any(|tag| c.contains(tag))
                        && !has_layout_tags(c)
                }),
            },
        ];

        Self { rules }
    }

    pub fn classify(&self, xml_content: &str) -> ResourceCategory {
        self.rules
            .iter()
            .find(|rule| (rule.matches)(xml_content))
            .map(|rule| rule.category)
            .unwrap_or(ResourceCategory::GenericXml)
    }

    /// Resource directory for a classified artifact. A caller-supplied path
    /// that already names a `res/` segment is explicit placement and is
    /// returned untouched.
    pub fn resource_dir(&self, category: ResourceCategory, path_hint: Option<&str>) -> String {
        if let Some(hint) = path_hint {
            let trimmed = hint.trim_matches('/');
            if trimmed.split('/').any(|segment| segment == "res")
                || trimmed.starts_with("res/")
                || trimmed == "res"
            {
                return trimmed.to_string();
            }
        }
        category.dir().to_string()
    }
}

impl Default for ResourceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
