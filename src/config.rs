use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable catalogs and bounds for the engine. All detection tables live
/// here rather than as compiled-in literals so tests can run the detectors
/// against synthetic signatures.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub detection: DetectionConfig,
    pub inference: InferenceConfig,
}

/// Catalogs consulted by the Android signature detector. Matching any one
/// entry of any catalog flags the content as Android platform code.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DetectionConfig {
    pub base_types: Vec<String>,
    pub annotations: Vec<String>,
    pub import_prefixes: Vec<String>,
    pub lifecycle_methods: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            base_types: vec![
                "Activity".to_string(),
                "AppCompatActivity".to_string(),
                "Fragment".to_string(),
                "Service".to_string(),
                "BroadcastReceiver".to_string(),
                "ContentProvider".to_string(),
                "Application".to_string(),
                "ViewModel".to_string(),
                "AndroidViewModel".to_string(),
                "RecyclerView.Adapter".to_string(),
                "RecyclerView.ViewHolder".to_string(),
            ],
            annotations: vec![
                "@Composable".to_string(),
                "@AndroidEntryPoint".to_string(),
                "@HiltAndroidApp".to_string(),
                "@HiltViewModel".to_string(),
                "@SuppressLint".to_string(),
                "@RequiresApi".to_string(),
            ],
            import_prefixes: vec![
                "import android.".to_string(),
                "import androidx.".to_string(),
            ],
            lifecycle_methods: vec![
                "onCreate".to_string(),
                "onStart".to_string(),
                "onResume".to_string(),
                "onPause".to_string(),
                "onStop".to_string(),
                "onDestroy".to_string(),
            ],
        }
    }
}

/// Bounds for package inference. The source scan is deliberately capped:
/// the first few files are almost always enough to learn the root package,
/// and large trees should not be walked end to end.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct InferenceConfig {
    pub entry_point_names: Vec<String>,
    pub source_scan_limit: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            entry_point_names: vec![
                "MainActivity".to_string(),
                "Application".to_string(),
                "App".to_string(),
            ],
            source_scan_limit: 5,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn create_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Self::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
