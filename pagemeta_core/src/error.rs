use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PagemetaError {
	#[error(transparent)]
	#[diagnostic(code(pagemeta::io_error))]
	Io(#[from] std::io::Error),

	#[error("outputPath must end with .json, got `{0}`")]
	#[diagnostic(
		code(pagemeta::invalid_output_path),
		help("point `outputPath` at a file such as `public/metadata.json`")
	)]
	InvalidOutputPath(String),

	#[error("Invalid option: {0}")]
	#[diagnostic(
		code(pagemeta::invalid_option),
		help("supported options: debounceTime, dev, dir, files, keys, outputPath")
	)]
	InvalidOption(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(pagemeta::config_parse),
		help("check that pagemeta.toml is valid TOML using the documented option names")
	)]
	ConfigParse(String),

	#[error("invalid glob pattern `{pattern}`: {reason}")]
	#[diagnostic(code(pagemeta::invalid_glob))]
	InvalidGlob { pattern: String, reason: String },

	#[error("syntax error at {line}:{column}")]
	#[diagnostic(
		code(pagemeta::parse),
		help("the file is skipped until it parses as JavaScript or TypeScript")
	)]
	Parse { line: usize, column: usize },

	#[error("failed to load grammar: {0}")]
	#[diagnostic(code(pagemeta::language))]
	Language(String),

	#[error("failed to serialize metadata: {0}")]
	#[diagnostic(code(pagemeta::serialize))]
	Serialize(#[from] serde_json::Error),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(pagemeta::symlink_cycle),
		help("remove the circular symlink from the search directory")
	)]
	SymlinkCycle { path: String },
}

pub type PagemetaResult<T> = Result<T, PagemetaError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
