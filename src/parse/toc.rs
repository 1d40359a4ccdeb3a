use std::collections::HashMap;

use regex::Regex;

/// One heading extracted from a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level, 1-3
    pub level: u8,
    /// Display text with inline markup stripped
    pub text: String,
    /// Unique anchor slug within the document
    pub slug: String,
}

/// Extract a table of contents from a markdown body.
///
/// Takes level 1-3 ATX headings outside fenced code blocks, strips inline
/// markup from the text, and assigns each heading a slug that is unique
/// within the document (collisions get `-1`, `-2`, ... suffixes in order of
/// appearance).
pub fn build_toc(markdown: &str) -> Vec<TocEntry> {
    let stripper = InlineStripper::new();
    let mut entries = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut fence: Option<char> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                None => fence = Some(marker),
                Some(open) if open == marker => fence = None,
                Some(_) => {}
            }
            continue;
        }
        if fence.is_some() || indent > 3 {
            continue;
        }

        let Some((level, rest)) = heading_line(trimmed) else {
            continue;
        };
        if level > 3 {
            continue;
        }

        let text = stripper.strip(rest.trim());
        let slug = unique_slug(&slugify(&text), &mut seen);
        entries.push(TocEntry { level, text, slug });
    }

    entries
}

/// Derive an anchor-safe slug from heading text: lowercase, keep only
/// letters, digits, whitespace, and hyphens (CJK ideographs count as
/// letters), turn whitespace runs into single hyphens, collapse repeats,
/// trim the ends. An empty result falls back to `"section"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
        // everything else is dropped without breaking a hyphen run
    }

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

fn unique_slug(base: &str, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(base.to_string()).or_insert(0);
    let slug = if *count == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    slug
}

fn fence_marker(trimmed: &str) -> Option<char> {
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

/// Split an ATX heading line into (level, text). Requires 1-6 hashes
/// followed by a space or end of line.
fn heading_line(trimmed: &str) -> Option<(u8, &str)> {
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest))
}

/// Removes inline markdown markers from heading text for display:
/// images and links keep their text, inline code keeps its content,
/// emphasis and strikethrough markers are dropped.
struct InlineStripper {
    image: Regex,
    link: Regex,
    code: Regex,
    strong: Regex,
    emphasis: Regex,
    underscore: Regex,
    strike: Regex,
}

impl InlineStripper {
    fn new() -> Self {
        // fixed patterns, compilation cannot fail
        InlineStripper {
            image: Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap(),
            link: Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap(),
            code: Regex::new(r"`([^`]*)`").unwrap(),
            strong: Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap(),
            emphasis: Regex::new(r"\*([^*]+)\*").unwrap(),
            // word-bounded so snake_case identifiers survive
            underscore: Regex::new(r"\b_([^_]+)_\b").unwrap(),
            strike: Regex::new(r"~~([^~]+)~~").unwrap(),
        }
    }

    fn strip(&self, text: &str) -> String {
        let s = self.image.replace_all(text, "$1");
        let s = self.link.replace_all(&s, "$1");
        let s = self.code.replace_all(&s, "$1");
        let s = self.strong.replace_all(&s, "$1$2");
        let s = self.emphasis.replace_all(&s, "$1");
        let s = self.underscore.replace_all(&s, "$1");
        let s = self.strike.replace_all(&s, "$1");
        s.into_owned()
    }
}
