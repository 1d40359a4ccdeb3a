mod init;
pub use init::cmd_init;

use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::loader::{self, LoadIssue};
use crate::model::node::NodeKind;
use crate::model::workspace::Workspace;
use crate::ops::{check, palette, query};
use crate::parse::toc::build_toc;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = content_dir(cli.content_dir.as_deref())?;

    match cli.command {
        // Init runs before any workspace exists
        Commands::Init(args) => cmd_init(&dir, args),

        Commands::Tree(args) => cmd_tree(&load(&dir)?, args, json),
        Commands::Show(args) => cmd_show(&load(&dir)?, args, json),
        Commands::Toc(args) => cmd_toc(&load(&dir)?, args, json),
        Commands::Search(args) => cmd_search(&load(&dir)?, args, json),
        Commands::Palette(args) => cmd_palette(&load(&dir)?, args, json),
        Commands::Tags => cmd_tags(&load(&dir)?, json),
        Commands::Recent(args) => cmd_recent(&load(&dir)?, args, json),
        Commands::Check => cmd_check(&load(&dir)?, json),
    }
}

fn content_dir(flag: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match flag {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e).into()),
        None => Ok(std::env::current_dir()?),
    }
}

fn load(dir: &PathBuf) -> Result<Workspace, Box<dyn std::error::Error>> {
    let (ws, issues) = loader::load_workspace(dir)?;
    report_issues(&issues);
    Ok(ws)
}

/// Skipped sources are reported on stderr; a partial repository still runs.
fn report_issues(issues: &[LoadIssue]) {
    for issue in issues {
        eprintln!("warning: skipped {}: {}", issue.path.display(), issue.reason);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_tree(ws: &Workspace, args: TreeArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows = query::tree_rows_expanded(&ws.repo, args.tag.as_deref());

    if json {
        let out: Vec<TreeRowJson> = rows
            .iter()
            .map(|r| {
                let name = ws.repo.get(&r.id).map(|n| n.name.as_str()).unwrap_or("");
                tree_row_to_json(r, name)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", ws.config.site.name);
    for row in &rows {
        let Some(node) = ws.repo.get(&row.id) else {
            continue;
        };
        let suffix = match node.kind {
            NodeKind::Folder => "/",
            NodeKind::File => "",
        };
        let marker = if row.direct_match { "  *" } else { "" };
        println!("{}{}{}{}", tree_guides(row), node.name, suffix, marker);
    }
    Ok(())
}

fn cmd_show(ws: &Workspace, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let node = ws
        .repo
        .resolve(&args.path)
        .filter(|n| n.kind == NodeKind::File)
        .ok_or_else(|| format!("no such file: {}", args.path))?;
    let body = node.content.as_deref().unwrap_or("");
    let toc = build_toc(body);

    if json {
        let out = ShowJson {
            file: file_to_json(node),
            toc: toc.iter().map(toc_entry_to_json).collect(),
            body: body.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", node.title);
    if let Some(date) = node.date {
        println!("date: {}", date);
    }
    if !node.tags.is_empty() {
        println!("tags: {}", node.tags.join(", "));
    }
    if !node.categories.is_empty() {
        println!("categories: {}", node.categories.join(" / "));
    }
    println!();
    print!("{}", body);
    if !body.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_toc(ws: &Workspace, args: TocArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let node = ws
        .repo
        .resolve(&args.path)
        .filter(|n| n.kind == NodeKind::File)
        .ok_or_else(|| format!("no such file: {}", args.path))?;
    let toc = build_toc(node.content.as_deref().unwrap_or(""));

    if json {
        let out: Vec<TocEntryJson> = toc.iter().map(toc_entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for entry in &toc {
        let indent = "  ".repeat((entry.level - 1) as usize);
        println!("{}{}  #{}", indent, entry.text, entry.slug);
    }
    Ok(())
}

fn cmd_search(
    ws: &Workspace,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hits = query::search_files(&ws.repo, &args.query);

    if json {
        let out: Vec<FileJson> = hits.iter().map(|n| file_to_json(n)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for node in hits {
        if node.tags.is_empty() {
            println!("{}", node.id);
        } else {
            println!("{}  [{}]", node.id, node.tags.join(", "));
        }
    }
    Ok(())
}

fn cmd_palette(
    ws: &Workspace,
    args: PaletteArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = palette::palette_results(&ws.repo, &args.query);

    if json {
        let out: Vec<PaletteItemJson> = items.iter().map(palette_item_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for item in &items {
        match item {
            palette::PaletteItem::File {
                id, title, name, ..
            } => {
                if title == name {
                    println!("{}  ({})", name, id);
                } else {
                    println!("{}  ({})", title, id);
                }
            }
            palette::PaletteItem::Tag { name } => println!("#{}", name),
        }
    }
    Ok(())
}

fn cmd_tags(ws: &Workspace, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tags = query::collect_all_tags(&ws.repo);

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}

fn cmd_recent(
    ws: &Workspace,
    args: RecentArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = args.limit.unwrap_or(ws.config.start.recent_limit);
    let files = query::recent_files(&ws.repo, args.tag.as_deref(), limit);

    if json {
        let out: Vec<FileJson> = files.iter().map(|n| file_to_json(n)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for node in files {
        let date = node
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "          ".to_string());
        println!("{}  {}  ({})", date, node.title, node.id);
    }
    Ok(())
}

fn cmd_check(ws: &Workspace, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = check::check_repository(&ws.repo);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for error in &result.errors {
            println!("error: {}", error);
        }
        for warning in &result.warnings {
            println!("warning: {}", warning);
        }
        if result.valid {
            println!("ok: {} nodes", ws.repo.len());
        }
    }

    if !result.valid {
        std::process::exit(1);
    }
    Ok(())
}
