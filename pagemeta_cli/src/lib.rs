use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use pagemeta_core::PluginOptions;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Collect the static metadata of every page into a single JSON index.",
	long_about = "pagemeta scans the page files of a file-based routing application, extracts \
	              the literal fields of each page's exported `metadata` object, and writes an \
	              index of route paths and metadata.\n\nQuick start:\n  pagemeta collect  \
	              Write the index once\n  pagemeta watch    Rewrite the index whenever pages \
	              change"
)]
pub struct PagemetaCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Collect page metadata and write the index file.
	///
	/// Options not given on the command line are read from `pagemeta.toml`
	/// and fall back to the built-in defaults: pages matching
	/// `**/page.{tsx,ts,jsx,js}` under `app`, the fields `title`,
	/// `description`, `keywords` and `category`, and the output file
	/// `public/metadata.json`.
	Collect(CollectArgs),
	/// Rewrite the index file whenever page files change.
	///
	/// Runs the collector as a development-mode build hook: updates arriving
	/// within the debounce window of the previous update are skipped and the
	/// file is only rewritten when the collected metadata changed.
	Watch {
		#[command(flatten)]
		collect: CollectArgs,

		/// Minimum time in milliseconds between two updates.
		#[arg(long)]
		debounce: Option<u64>,
	},
}

#[derive(Debug, Clone, Default, Args)]
pub struct CollectArgs {
	/// Directory to search for page files, relative to the project root.
	#[arg(long)]
	pub dir: Option<PathBuf>,

	/// Metadata field to collect. Repeat to collect several fields.
	#[arg(long = "key", value_name = "KEY")]
	pub keys: Vec<String>,

	/// Output file for the index. Must end with `.json`.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Glob pattern selecting page files. Repeat to add patterns.
	#[arg(long = "files", value_name = "GLOB")]
	pub files: Vec<String>,
}

impl CollectArgs {
	/// Apply command line overrides on top of options loaded from config.
	pub fn merge_into(&self, mut options: PluginOptions) -> PluginOptions {
		if let Some(dir) = &self.dir {
			options.collector.dir = Some(dir.clone());
		}
		if !self.keys.is_empty() {
			options.collector.keys = Some(self.keys.clone());
		}
		if let Some(output) = &self.output {
			options.collector.output_path = Some(output.clone());
		}
		if !self.files.is_empty() {
			options.collector.files = Some(self.files.clone());
		}
		options
	}
}
