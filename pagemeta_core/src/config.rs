use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::PagemetaError;
use crate::PagemetaResult;
use crate::discovery::build_glob_set;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"pagemeta.toml",
	".pagemeta.toml",
	".config/pagemeta.toml",
];

/// Directory searched for page files when `dir` is not set.
pub const DEFAULT_DIR: &str = "app";

/// Output file used when `outputPath` is not set.
pub const DEFAULT_OUTPUT_PATH: &str = "public/metadata.json";

/// Page file patterns used when `files` is not set.
pub const DEFAULT_FILES: [&str; 4] = ["**/page.tsx", "**/page.ts", "**/page.jsx", "**/page.js"];

/// Metadata fields collected when `keys` is not set.
pub const DEFAULT_KEYS: [&str; 4] = ["title", "description", "keywords", "category"];

/// Debounce window used in development mode when `debounceTime` is not set.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Every option name accepted by the plugin and the config file.
pub const PLUGIN_OPTION_KEYS: [&str; 6] = [
	"debounceTime",
	"dev",
	"dir",
	"files",
	"keys",
	"outputPath",
];

/// Options for a single collection run. Unset options fall back to the
/// defaults above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorOptions {
	/// Directory to search for page files, relative to the project root.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dir: Option<PathBuf>,
	/// Metadata field names to collect.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub keys: Option<Vec<String>>,
	/// Destination of the index file. Must end with `.json`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub output_path: Option<PathBuf>,
	/// Glob patterns, relative to `dir`, selecting page files.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub files: Option<Vec<String>>,
}

/// [`CollectorOptions`] with defaults applied and paths made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
	pub search_root: PathBuf,
	pub keys: BTreeSet<String>,
	pub output_path: PathBuf,
	pub files: Vec<String>,
}

impl CollectorOptions {
	/// Validate the options and resolve them against the project `root`.
	///
	/// Invalid output paths and page globs are rejected here. This never
	/// touches the filesystem.
	pub fn resolve(&self, root: &Path) -> PagemetaResult<ResolvedOptions> {
		if let Some(output_path) = &self.output_path {
			validate_output_path(output_path)?;
		}

		let dir = self
			.dir
			.clone()
			.unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
		let keys = self.keys.as_ref().map_or_else(
			|| DEFAULT_KEYS.iter().map(ToString::to_string).collect(),
			|keys| keys.iter().cloned().collect(),
		);
		let files = self
			.files
			.clone()
			.unwrap_or_else(|| DEFAULT_FILES.iter().map(ToString::to_string).collect());
		build_glob_set(&files)?;
		let output_path = self
			.output_path
			.clone()
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

		Ok(ResolvedOptions {
			search_root: root.join(dir),
			keys,
			output_path: root.join(output_path),
			files,
		})
	}
}

/// Reject output paths that do not end with the literal `.json` suffix.
pub fn validate_output_path(path: &Path) -> PagemetaResult<()> {
	let display = path.to_string_lossy();
	if display.ends_with(".json") {
		Ok(())
	} else {
		Err(PagemetaError::InvalidOutputPath(display.into_owned()))
	}
}

/// Options accepted by [`crate::MetadataCollectorPlugin`] and by the
/// `pagemeta.toml` config file.
///
/// ```toml
/// dir = "src/app"
/// keys = ["title", "description", "keywords"]
/// outputPath = "public/search-index.json"
/// files = ["**/page.tsx", "**/page.mdx"]
/// dev = true
/// debounceTime = 500
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
	#[serde(flatten)]
	pub collector: CollectorOptions,
	/// Enable development mode with debouncing.
	#[serde(default)]
	pub dev: bool,
	/// Debounce time in milliseconds for development mode updates.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub debounce_time: Option<u64>,
}

impl PluginOptions {
	/// Build options from a TOML table, rejecting unknown keys by name.
	pub fn from_table(table: toml::Table) -> PagemetaResult<Self> {
		if let Some(key) = table
			.keys()
			.find(|key| !PLUGIN_OPTION_KEYS.contains(&key.as_str()))
		{
			return Err(PagemetaError::InvalidOption(key.clone()));
		}

		toml::Value::Table(table)
			.try_into::<Self>()
			.map_err(|e| PagemetaError::ConfigParse(e.to_string()))
	}

	/// The debounce window, defaulting to one second.
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_time.unwrap_or(DEFAULT_DEBOUNCE_MS))
	}

	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load options from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> PagemetaResult<Option<PluginOptions>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let table: toml::Table =
			toml::from_str(&content).map_err(|e| PagemetaError::ConfigParse(e.to_string()))?;

		Self::from_table(table).map(Some)
	}
}
