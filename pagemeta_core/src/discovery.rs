use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;

use crate::PagemetaError;
use crate::PagemetaResult;

/// Build a glob set where `*` never matches a path separator, mirroring the
/// usual shell and bundler semantics for page patterns.
pub fn build_glob_set(patterns: &[String]) -> PagemetaResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = GlobBuilder::new(pattern)
			.literal_separator(true)
			.build()
			.map_err(|e| {
				PagemetaError::InvalidGlob {
					pattern: pattern.clone(),
					reason: e.kind().to_string(),
				}
			})?;
		builder.add(glob);
	}

	builder.build().map_err(|e| {
		PagemetaError::InvalidGlob {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

/// Find every file under `root` matching one of `patterns`.
///
/// Returned paths are relative to `root`, use `/` separators and are sorted
/// so that discovery order is deterministic. Hidden entries and
/// `node_modules` are skipped. A missing `root` yields no files. Symlinked
/// directories are followed; subdirectories that cannot be read or that link
/// back to one of their ancestors are skipped with a warning. Only a failure
/// to read `root` itself is returned as an error.
pub fn discover_pages(root: &Path, patterns: &[String]) -> PagemetaResult<Vec<String>> {
	let glob_set = build_glob_set(patterns)?;
	let mut files = Vec::new();
	let mut ancestors = HashSet::new();

	walk_dir(root, root, &glob_set, &mut files, &mut ancestors)?;

	files.sort();
	Ok(files)
}

/// Convert `file` into a `/` separated path relative to `root`.
pub fn relative_file_key(root: &Path, file: &Path) -> String {
	file.strip_prefix(root)
		.unwrap_or(file)
		.to_string_lossy()
		.replace('\\', "/")
}

fn is_ignored_entry_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules"
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	glob_set: &GlobSet,
	files: &mut Vec<String>,
	ancestors: &mut HashSet<PathBuf>,
) -> PagemetaResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// A cycle only exists when a directory is its own ancestor. The same
	// directory reached through two sibling links is walked twice.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if ancestors.contains(&canonical) {
		return Err(PagemetaError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	let entries = std::fs::read_dir(dir)?;
	ancestors.insert(canonical.clone());

	for entry in entries {
		let path = match entry {
			Ok(entry) => entry.path(),
			Err(error) => {
				tracing::warn!("Failed to read entry in {}: {error}", dir.display());
				continue;
			}
		};

		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_ignored_entry_name(name) {
				continue;
			}
		}

		if path.is_dir() {
			if let Err(error) = walk_dir(root, &path, glob_set, files, ancestors) {
				tracing::warn!("Skipping directory {}: {error}", path.display());
			}
			continue;
		}

		let relative = relative_file_key(root, &path);
		if glob_set.is_match(&relative) {
			files.push(relative);
		}
	}

	ancestors.remove(&canonical);
	Ok(())
}
