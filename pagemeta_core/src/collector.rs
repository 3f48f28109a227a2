use std::path::Path;

use crate::ChangeDetector;
use crate::CollectorOptions;
use crate::PageMetadata;
use crate::PagemetaResult;
use crate::ResolvedOptions;
use crate::discovery::discover_pages;
use crate::extractor::extract_metadata;
use crate::syntax::SourceLanguage;

/// Collect static metadata from every page under the configured directory
/// and write the index file when the collection changed.
///
/// Configuration errors are returned before anything is read. Once past
/// validation the run never fails: unreadable, empty or malformed files are
/// skipped with a warning and write failures are logged.
///
/// Returns an empty list when the collection is unchanged since the last run
/// recorded by `detector`; nothing is written in that case.
pub fn collect_metadata(
	root: &Path,
	options: &CollectorOptions,
	detector: &mut ChangeDetector,
) -> PagemetaResult<Vec<PageMetadata>> {
	let resolved = options.resolve(root)?;
	Ok(collect_resolved(&resolved, detector))
}

/// Same as [`collect_metadata`] with options that were already resolved.
///
/// When the search directory cannot be read the run is abandoned: the change
/// detector and the output file are left untouched.
pub fn collect_resolved(options: &ResolvedOptions, detector: &mut ChangeDetector) -> Vec<PageMetadata> {
	let collection = match scan_pages(options) {
		Ok(collection) => collection,
		Err(error) => {
			tracing::warn!(
				"Failed to discover pages in {}: {error}",
				options.search_root.display()
			);
			return Vec::new();
		}
	};

	match detector.is_unchanged(&collection) {
		Ok(true) => {
			tracing::debug!("metadata unchanged, skipping write");
			return Vec::new();
		}
		Ok(false) => {}
		Err(error) => tracing::warn!("Failed to compute metadata checksum: {error}"),
	}

	write_collection(&options.output_path, &collection);
	collection
}

/// Extract metadata from every discovered page without touching the change
/// detector or the output file. Only discovery failures are returned; files
/// that cannot be read or parsed are skipped with a warning.
pub fn scan_pages(options: &ResolvedOptions) -> PagemetaResult<Vec<PageMetadata>> {
	let page_files = discover_pages(&options.search_root, &options.files)?;

	let mut collection = Vec::with_capacity(page_files.len());
	for page_file in &page_files {
		match read_page(options, page_file) {
			Ok(Some(page)) => collection.push(page),
			Ok(None) => {}
			Err(error) => tracing::warn!("Failed to parse metadata for {page_file}: {error}"),
		}
	}

	Ok(collection)
}

fn read_page(options: &ResolvedOptions, page_file: &str) -> PagemetaResult<Option<PageMetadata>> {
	let full_path = options.search_root.join(page_file);
	let content = std::fs::read_to_string(&full_path)?;

	if content.is_empty() {
		tracing::warn!("File {} is empty", full_path.display());
		return Ok(None);
	}

	let language = SourceLanguage::from_path(&full_path);
	let Some(metadata) = extract_metadata(&content, &options.keys, language)? else {
		tracing::debug!("no static metadata in {page_file}");
		return Ok(None);
	};

	Ok(Some(PageMetadata {
		pathname: page_pathname(page_file),
		metadata,
	}))
}

/// Route path for a page file given relative to the search root.
///
/// The directory of the file becomes the route, with optional catch-all
/// segments (`[[...slug]]`) removed.
///
/// ```rust
/// use pagemeta_core::page_pathname;
///
/// assert_eq!(page_pathname("page.tsx"), "/");
/// assert_eq!(page_pathname("blog/post/page.tsx"), "/blog/post");
/// assert_eq!(page_pathname("docs/[[...slug]]/page.tsx"), "/docs");
/// ```
pub fn page_pathname(page_file: &str) -> String {
	let normalized = page_file.replace('\\', "/");
	let dirname = normalized.rsplit_once('/').map_or("", |(dir, _)| dir);
	let dirname = strip_optional_catch_all(dirname);
	let dirname = dirname.trim_start_matches("./").trim_start_matches('/');

	if dirname.is_empty() || dirname == "." {
		"/".to_string()
	} else {
		format!("/{dirname}")
	}
}

/// Remove the span from the first `[[` segment through the last `]]`,
/// including the separator in front of it.
fn strip_optional_catch_all(dirname: &str) -> String {
	let start = if dirname.starts_with("[[") {
		Some(0)
	} else {
		dirname.find("/[[")
	};

	let Some(start) = start else {
		return dirname.to_string();
	};

	match dirname.rfind("]]") {
		Some(end) if end > start => format!("{}{}", &dirname[..start], &dirname[end + 2..]),
		_ => dirname.to_string(),
	}
}

/// Write the collection as pretty printed JSON, creating parent directories
/// as needed. Failures are logged and never propagated.
pub fn write_collection(output_path: &Path, collection: &[PageMetadata]) {
	if let Some(output_dir) = output_path.parent() {
		if let Err(error) = std::fs::create_dir_all(output_dir) {
			tracing::warn!("Failed to create output directory: {error}");
		}
	}

	let payload = match serde_json::to_string_pretty(collection) {
		Ok(payload) => payload,
		Err(error) => {
			tracing::warn!("Failed to write output file: {error}");
			return;
		}
	};

	if let Err(error) = std::fs::write(output_path, payload) {
		tracing::warn!("Failed to write output file: {error}");
	}
}
