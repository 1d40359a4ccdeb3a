use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;

const SAMPLE_POST: &str = "\
---
title: \"Hello, World\"
date: 2024-01-01
tags:
  - meta
categories:
  - Meta
---
# Hello, World

First entry. Headings below the fold land in the table of contents.

## What lives here

Posts, notes, and whatever else fits on the desk.
";

const WELCOME: &str = "\
---
title: Welcome
---
# Welcome

This directory is a devdesk content root. Run `desk tree` to see it.
";

/// Scaffold a content directory: desk.toml, a welcome file, and one sample
/// post under posts/.
pub fn cmd_init(dir: &Path, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = dir.join("desk.toml");
    if config_path.exists() && !args.force {
        return Err("desk.toml already exists (use --force to scaffold anyway)".into());
    }

    let name = match args.name {
        Some(name) => name,
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "DEV.OS".to_string()),
    };

    fs::create_dir_all(dir.join("posts"))?;
    fs::write(
        &config_path,
        format!(
            "[site]\nname = \"{}\"\n\n[start]\nopen = \"welcome.md\"\nrecent_limit = 8\n",
            name
        ),
    )?;
    fs::write(dir.join("welcome.md"), WELCOME)?;
    fs::write(dir.join("posts/hello-world.md"), SAMPLE_POST)?;

    println!("initialized desk '{}' in {}", name, dir.display());
    Ok(())
}
