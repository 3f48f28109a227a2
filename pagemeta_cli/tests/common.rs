#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub const HOME_PAGE: &str = r#"
import { Metadata } from "next";

export const metadata: Metadata = {
  title: "Home",
  description: "Welcome",
  keywords: ["home", "landing"],
  applicationName: "Site",
};

export default function Page() {
  return <main>Home</main>;
}
"#;

pub const POST_PAGE: &str = r#"
export const metadata = {
  title: "Post",
  category: "blog",
};

export default async function Page() {
  return "Post";
}
"#;

pub fn pagemeta_cmd() -> Command {
	let mut cmd =
		Command::cargo_bin("pagemeta").unwrap_or_else(|e| panic!("pagemeta binary not built: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("PAGEMETA_LOG");
	cmd
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)
			.unwrap_or_else(|e| panic!("create_dir_all {}: {e}", parent.display()));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}

pub fn read_index(path: &Path) -> serde_json::Value {
	let content = std::fs::read_to_string(path)
		.unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
	serde_json::from_str(&content).unwrap_or_else(|e| panic!("parse {}: {e}", path.display()))
}
