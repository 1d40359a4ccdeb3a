//! Command-palette projection.
//!
//! A query starting with `#` searches tags; anything else fuzzy-matches
//! files. The presentation layer renders the results and feeds the selected
//! item back into `ops::nav` (open the file, set the tag filter).

use crate::model::node::ContentNode;
use crate::model::repository::Repository;

/// One palette result.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteItem {
    File {
        id: String,
        title: String,
        name: String,
        score: i32,
        /// Matched character indices within `"{title} {name}"`, for
        /// highlight rendering
        matched: Vec<usize>,
    },
    Tag {
        name: String,
    },
}

/// Run a palette query against the repository.
///
/// `#token` lists tags containing the token (case-insensitive substring,
/// sorted). An empty query lists every file in repository order. Anything
/// else fuzzy-matches files by title and name, best score first, ties
/// broken alphabetically by title.
pub fn palette_results(repo: &Repository, query: &str) -> Vec<PaletteItem> {
    let query = query.trim();

    if let Some(token) = query.strip_prefix('#') {
        let needle = token.trim().to_lowercase();
        return crate::ops::query::collect_all_tags(repo)
            .into_iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .map(|name| PaletteItem::Tag { name })
            .collect();
    }

    if query.is_empty() {
        return repo.files().map(|f| unscored(f)).collect();
    }

    let mut items: Vec<PaletteItem> = repo
        .files()
        .filter_map(|f| {
            let target = format!("{} {}", f.title, f.name);
            let (score, matched) = fuzzy_score(query, &target)?;
            Some(PaletteItem::File {
                id: f.id.clone(),
                title: f.title.clone(),
                name: f.name.clone(),
                score,
                matched,
            })
        })
        .collect();

    items.sort_by(|a, b| match (a, b) {
        (
            PaletteItem::File {
                score: sa,
                title: ta,
                ..
            },
            PaletteItem::File {
                score: sb,
                title: tb,
                ..
            },
        ) => sb.cmp(sa).then_with(|| ta.cmp(tb)),
        _ => std::cmp::Ordering::Equal,
    });
    items
}

fn unscored(file: &ContentNode) -> PaletteItem {
    PaletteItem::File {
        id: file.id.clone(),
        title: file.title.clone(),
        name: file.name.clone(),
        score: 0,
        matched: Vec::new(),
    }
}

/// Fuzzy score a query against a target string. Returns None when the query
/// characters don't all appear in order; otherwise a score plus the matched
/// character indices.
///
/// Scoring: +10 for a match at a word start, +5 for extending a consecutive
/// run, +3 for landing in the first half of the target, minus the size of
/// any gap skipped since the previous match.
pub fn fuzzy_score(query: &str, target: &str) -> Option<(i32, Vec<usize>)> {
    if query.is_empty() {
        return Some((0, Vec::new()));
    }

    let query_lower: Vec<char> = query.chars().flat_map(|c| c.to_lowercase()).collect();
    let target_chars: Vec<char> = target.chars().collect();
    let target_lower: Vec<char> = target.chars().flat_map(|c| c.to_lowercase()).collect();

    let mut matched = Vec::with_capacity(query_lower.len());
    let mut from = 0;
    for &qc in &query_lower {
        let pos = target_lower[from..].iter().position(|&tc| tc == qc)?;
        matched.push(from + pos);
        from = from + pos + 1;
    }

    let half = target_chars.len() / 2;
    let mut score = 0i32;
    for (mi, &idx) in matched.iter().enumerate() {
        let at_word_start = idx == 0
            || matches!(
                target_chars.get(idx.wrapping_sub(1)),
                Some(' ' | '-' | '_' | '/' | '.' | '(')
            );
        if at_word_start {
            score += 10;
        }
        if mi > 0 && idx == matched[mi - 1] + 1 {
            score += 5;
        }
        if idx < half {
            score += 3;
        }
        if mi > 0 {
            score -= idx.saturating_sub(matched[mi - 1] + 1) as i32;
        }
    }

    Some((score, matched))
}
