use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use owo_colors::OwoColorize;
use pagemeta_cli::CollectArgs;
use pagemeta_cli::Commands;
use pagemeta_cli::PagemetaCli;
use pagemeta_core::AfterEmitHook;
use pagemeta_core::BuildHooks;
use pagemeta_core::ChangeDetector;
use pagemeta_core::MetadataCollectorPlugin;
use pagemeta_core::PluginOptions;
use pagemeta_core::collect_resolved;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = PagemetaCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Collect(collect)) => run_collect(&args, collect),
		Some(Commands::Watch { collect, debounce }) => run_watch(&args, collect, *debounce),
		None => {
			eprintln!("No subcommand specified. Run `pagemeta --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<pagemeta_core::PagemetaError>() {
			Ok(pagemeta_err) => {
				let report: miette::Report = (*pagemeta_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_env("PAGEMETA_LOG")
		.unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &PagemetaCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_options(root: &Path, collect: &CollectArgs) -> pagemeta_core::PagemetaResult<PluginOptions> {
	let options = PluginOptions::load(root)?.unwrap_or_default();
	Ok(collect.merge_into(options))
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn run_collect(args: &PagemetaCli, collect: &CollectArgs) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let options = load_options(&root, collect)?;
	let resolved = options.collector.resolve(&root)?;
	let mut detector = ChangeDetector::new();
	let pages = collect_resolved(&resolved, &mut detector);

	let output = make_relative(&resolved.output_path, &root);
	println!(
		"{} {} page(s) into {output}",
		colored!("Collected", green),
		pages.len()
	);

	if args.verbose {
		for page in &pages {
			println!("  {}", page.pathname);
		}
	}

	Ok(())
}

/// A development build host that fires after-emit hooks whenever files in
/// the watched directory change.
#[derive(Default)]
struct WatchHost {
	hooks: Vec<(&'static str, AfterEmitHook)>,
}

impl BuildHooks for WatchHost {
	fn tap_after_emit(&mut self, name: &'static str, hook: AfterEmitHook) {
		tracing::debug!("registered after-emit hook `{name}`");
		self.hooks.push((name, hook));
	}
}

impl WatchHost {
	fn emit(&mut self) {
		for (_, hook) in &mut self.hooks {
			hook();
		}
	}
}

fn run_watch(
	args: &PagemetaCli,
	collect: &CollectArgs,
	debounce: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let mut options = load_options(&root, collect)?;
	options.dev = true;
	if debounce.is_some() {
		options.debounce_time = debounce;
	}

	// Surface configuration errors before watching.
	let resolved = options.collector.resolve(&root)?;

	let mut host = WatchHost::default();
	MetadataCollectorPlugin::new(&root, options).apply(&mut host);
	host.emit();

	std::fs::create_dir_all(&resolved.search_root)?;
	println!(
		"\n{} {} for page changes... (press Ctrl+C to stop)",
		colored!("Watching", bold),
		make_relative(&resolved.search_root, &root)
	);

	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if matches!(
					event.kind,
					notify::EventKind::Modify(_)
						| notify::EventKind::Create(_)
						| notify::EventKind::Remove(_)
				) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&resolved.search_root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		host.emit();
	}
}
