pub mod front_matter;
pub mod toc;

pub use front_matter::{FrontMatter, ParsedSource, parse_source};
pub use toc::{TocEntry, build_toc, slugify};
