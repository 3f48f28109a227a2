use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::ChangeDetector;
use crate::PageMetadata;
use crate::PluginOptions;
use crate::collector::collect_metadata;

/// Name the plugin registers its hook under.
pub const PLUGIN_NAME: &str = "MetadataCollectorPlugin";

/// Callback run by a build host after it has emitted its output.
pub type AfterEmitHook = Box<dyn FnMut() + Send>;

/// The hook surface a build host exposes to plugins.
pub trait BuildHooks {
	/// Register `hook` to run after every emit.
	fn tap_after_emit(&mut self, name: &'static str, hook: AfterEmitHook);
}

/// Regenerates the metadata index whenever the host finishes an emit.
///
/// In development mode, emits that arrive within the debounce window of the
/// previous update are ignored.
#[derive(Debug)]
pub struct MetadataCollectorPlugin {
	root: PathBuf,
	options: PluginOptions,
	detector: ChangeDetector,
	last_update: Option<Instant>,
}

impl MetadataCollectorPlugin {
	pub fn new(root: impl AsRef<Path>, options: PluginOptions) -> Self {
		Self {
			root: root.as_ref().to_path_buf(),
			options,
			detector: ChangeDetector::new(),
			last_update: None,
		}
	}

	/// Build the plugin from a raw option table. Unknown option names are
	/// rejected with [`crate::PagemetaError::InvalidOption`].
	pub fn from_table(root: impl AsRef<Path>, table: toml::Table) -> crate::PagemetaResult<Self> {
		let options = PluginOptions::from_table(table)?;
		Ok(Self::new(root, options))
	}

	pub fn options(&self) -> &PluginOptions {
		&self.options
	}

	/// Register the after-emit hook with the host. The plugin moves into the
	/// hook.
	pub fn apply(mut self, hooks: &mut impl BuildHooks) {
		hooks.tap_after_emit(
			PLUGIN_NAME,
			Box::new(move || {
				self.on_after_emit();
			}),
		);
	}

	/// Run one hook invocation.
	///
	/// Returns `None` when the call was debounced or the collection failed,
	/// otherwise the collected pages (empty when nothing changed).
	pub fn on_after_emit(&mut self) -> Option<Vec<PageMetadata>> {
		self.on_after_emit_at(Instant::now())
	}

	pub(crate) fn on_after_emit_at(&mut self, now: Instant) -> Option<Vec<PageMetadata>> {
		if self.options.dev {
			if let Some(last_update) = self.last_update {
				if now.saturating_duration_since(last_update) < self.options.debounce() {
					tracing::debug!("skipping metadata update inside debounce window");
					return None;
				}
			}
			self.last_update = Some(now);
		}

		match collect_metadata(&self.root, &self.options.collector, &mut self.detector) {
			Ok(collection) => {
				tracing::info!("📄 Updated metadata");
				Some(collection)
			}
			Err(error) => {
				tracing::error!("Error updating metadata: {error}");
				None
			}
		}
	}
}
