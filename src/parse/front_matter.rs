use chrono::NaiveDate;
use indexmap::IndexMap;

/// Metadata parsed from a source's front-matter block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    /// Hierarchical category path, in order
    pub categories: Vec<String>,
    /// Unrecognized keys, passed through opaquely in order
    pub extra: IndexMap<String, String>,
}

/// A source split into front-matter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    pub front: FrontMatter,
    pub body: String,
}

/// Split a raw source into front-matter and body.
///
/// The block is a leading `---` line, `key: value` / `key:` + `- item` lines,
/// and a closing `---` line. A source without a block (or with an unterminated
/// one) yields default metadata and the raw text as the body, byte for byte,
/// so malformed metadata never loses user content.
pub fn parse_source(text: &str) -> ParsedSource {
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return raw(text);
    };
    if first.trim_end() != "---" {
        return raw(text);
    }

    // Collect block lines up to the closing delimiter, tracking the byte
    // offset where the body starts.
    let mut offset = first.len();
    let mut block: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines {
        offset += line.len();
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return raw(text);
    }

    ParsedSource {
        front: parse_block(&block),
        body: text[offset..].to_string(),
    }
}

fn raw(text: &str) -> ParsedSource {
    ParsedSource {
        front: FrontMatter::default(),
        body: text.to_string(),
    }
}

fn parse_block(lines: &[&str]) -> FrontMatter {
    let mut front = FrontMatter::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();
        i += 1;
        if line.trim().is_empty() {
            continue;
        }
        // Lines that aren't key: value are skipped, not fatal
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if value.is_empty() {
            // `key:` with no inline value collects the following `- item`
            // lines into an ordered sequence
            let mut items = Vec::new();
            while i < lines.len() {
                let item_line = lines[i].trim();
                if let Some(item) = item_line.strip_prefix("- ") {
                    items.push(unquote(item.trim()).to_string());
                    i += 1;
                } else if item_line == "-" {
                    items.push(String::new());
                    i += 1;
                } else {
                    break;
                }
            }
            assign_list(&mut front, key, items);
        } else {
            assign_scalar(&mut front, key, unquote(value));
        }
    }

    front
}

fn assign_scalar(front: &mut FrontMatter, key: &str, value: &str) {
    match key {
        "title" => front.title = Some(value.to_string()),
        // A date that doesn't parse is dropped, not fatal
        "date" => front.date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
        // Inline scalar where a list is expected: treat as a one-item list
        "tags" => front.tags = vec![value.to_string()],
        "categories" => front.categories = vec![value.to_string()],
        _ => {
            front.extra.insert(key.to_string(), value.to_string());
        }
    }
}

fn assign_list(front: &mut FrontMatter, key: &str, items: Vec<String>) {
    match key {
        "tags" => front.tags = items,
        "categories" => front.categories = items,
        "title" => front.title = items.into_iter().next(),
        "date" => {
            front.date = items
                .first()
                .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok());
        }
        _ => {
            front.extra.insert(key.to_string(), items.join(", "));
        }
    }
}

/// Strip one layer of matching wrapping quotes
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
