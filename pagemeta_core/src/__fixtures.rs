use std::collections::BTreeSet;
use std::path::Path;

use crate::DEFAULT_KEYS;

pub const JSX_PAGE: &str = r#"
import React from "react";

export const metadata = {
  title: "Hello World",
  description: "Hello World",
  keywords: ["hello", "world"],
  category: "test",
  applicationName: "Hello World",
  generator: "Next.js",
};

export default async function Page() {
  return (
    <div>
      <h1>Hello</h1>
      <p>World</p>
    </div>
  );
}
"#;

pub const TSX_PAGE: &str = r#"
import React from "react";
import { Metadata } from "next";

export const metadata: Metadata = {
  title: "Hello World",
  description: "Hello World",
  keywords: ["hello", "world"],
  category: "test",
  applicationName: "Hello World",
  generator: "Next.js",
};

export default async function Page({
  props,
}: {
  props: { name: string };
}) {
  return (
    <div>
      <h1>Hello</h1>
      <p>{props.name}</p>
    </div>
  );
}
"#;

pub const JS_PAGE: &str = r#"
export const metadata = {
  title: "Test Page",
  description: "Test Description",
  keywords: ["test", "page"],
  category: "test",
};

export default async function Page() {
  return "Hello World";
}
"#;

pub const TS_PAGE: &str = r#"
import { Metadata } from "next";

export const metadata: Metadata = {
  title: "Test Page",
  description: "Test Description",
  keywords: ["test", "page"],
  category: "test",
};

export default async function Page({
  params,
}: {
  params: Promise<{ slug: string }>;
}) {
  const slug = (await params).slug;

  return slug;
}
"#;

pub const TSX_PAGE_DYNAMIC: &str = r#"
import { Metadata } from "next";
import React from "react";
import { z } from "zod";

type Props = {
  params: {
    id: string;
  };
};

function fetchPage(id: string): Promise<{ name: string; description: string }> {
  throw new Error("Function not implemented.");
}

export async function generateMetadata({ params }: Props): Promise<Metadata> {
  const validId = z.string().uuid("Invalid id").safeParse(params.id).success;

  if (!validId) {
    return {
      title: "Invalid Page",
      description: "Invalid page id",
    };
  }

  const data = await fetchPage(params.id);
  return {
    title: data?.name ?? "Page",
    description: data?.description ?? "Page description",
  };
}

export default async function Page() {
  return <div>Hello World</div>;
}
"#;

pub const BASIC_METADATA: &str = r#"
export const metadata = {
  title: "Test Page",
  description: "Test Description",
  applicationName: "My App",
  generator: "Next.js",
  keywords: ["test", "page"],
  category: "test"
};
"#;

pub const ANNOTATED_METADATA: &str = r#"
export const metadata: Metadata = {
  title: "Test Page",
  description: "Test Description",
  applicationName: "My App",
  generator: "Next.js",
  keywords: ["test", "page"],
  category: "test"
};
"#;

pub const COMMENTED_METADATA: &str = r#"
export const metadata = {
  title: "Test Page",
  // comment
  description: "Test Description", // comment
  keywords: [
    "test", // comment
    "page", // comment
  ],
};
"#;

pub const OPEN_GRAPH_METADATA: &str = r#"
export const metadata: Metadata = {
  title: "Test Page",
  description: "Test Description",
  openGraph: {
    title: "Test Page",
    description: "Test Description",
    images: ["https://example.com/image.png"],
  },
};
"#;

pub const BROKEN_PAGE: &str = r#"
export const metadata = {
  title: "Broken",
"#;

pub fn default_keys() -> BTreeSet<String> {
	DEFAULT_KEYS.iter().map(ToString::to_string).collect()
}

pub fn keys(names: &[&str]) -> BTreeSet<String> {
	names.iter().map(ToString::to_string).collect()
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_page(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)
			.unwrap_or_else(|e| panic!("create_dir_all {}: {e}", parent.display()));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}
