use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "desk", about = concat!("[~] devdesk v", env!("CARGO_PKG_VERSION"), " - your desk is plain markdown"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different content directory
    #[arg(short = 'C', long = "content-dir", global = true)]
    pub content_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a content directory
    Init(InitArgs),
    /// Print the explorer tree
    Tree(TreeArgs),
    /// Show one file: metadata, table of contents, and body
    Show(ShowArgs),
    /// Print a file's table of contents
    Toc(TocArgs),
    /// Search files by name or tag
    Search(SearchArgs),
    /// Run a command-palette query (a `#` prefix searches tags)
    Palette(PaletteArgs),
    /// List all tags
    Tags,
    /// Show the dashboard feed of recent entries
    Recent(RecentArgs),
    /// Validate content tree integrity
    Check,
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Site name (default: inferred from the directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Scaffold even if desk.toml already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Narrow the tree to files carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// File path relative to the content root
    pub path: String,
}

#[derive(Args)]
pub struct TocArgs {
    /// File path relative to the content root
    pub path: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive substring matched against names and tags
    pub query: String,
}

#[derive(Args)]
pub struct PaletteArgs {
    /// Palette query (empty lists every file)
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct RecentArgs {
    /// Entry count (default: start.recent_limit from desk.toml)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Narrow the feed to files carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
}
