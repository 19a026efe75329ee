//! Markup-to-text normalization for listing descriptions.
//!
//! Descriptions arrive as a loose HTML subset. They are tokenized, built into
//! a small block tree (paragraphs, headings, list items), and flattened to
//! plain text where structure survives only as newlines:
//!
//! - `<br>` becomes one newline.
//! - A paragraph or heading ends with a blank line.
//! - A list item starts with a bullet and ends with one newline.
//! - Every other tag is dropped; `script`/`style` bodies and comments go too.
//! - Entities are decoded in text, never in tag names or attributes.
//!
//! The result is then tidied: runs of horizontal whitespace collapse to one
//! space, lines are trimmed, and no more than one blank line separates
//! blocks. Text without markup passes through tidying unchanged, so
//! normalizing twice gives the same result as normalizing once (unless the
//! first pass decodes entities into new markup such as `&lt;p&gt;`).

use html_escape::decode_html_entities;

const BULLET: &str = "• ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Paragraph,
    Heading,
    ListItem,
}

impl BlockKind {
    fn from_tag(name: &str) -> Option<Self> {
        match name {
            "p" => Some(BlockKind::Paragraph),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(BlockKind::Heading),
            "li" => Some(BlockKind::ListItem),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Node {
    Text(String),
    LineBreak,
    Block { kind: BlockKind, children: Vec<Node> },
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Open { name: String, self_closing: bool },
    Close(String),
}

/// Converts a description markup fragment into plain text.
///
/// Never fails: unknown, unbalanced, or unterminated tags are dropped and
/// whatever text remains is kept.
#[must_use]
pub fn normalize_description(markup: &str) -> String {
    let tree = build_tree(tokenize(markup));
    let mut flat = String::with_capacity(markup.len());
    render(&tree, &mut flat);
    tidy(&flat)
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

fn tokenize(markup: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = markup;

    while !rest.is_empty() {
        let Some(start) = find_tag_start(rest) else {
            tokens.push(Token::Text(rest));
            break;
        };
        if start > 0 {
            tokens.push(Token::Text(&rest[..start]));
        }

        let (token, consumed) = read_tag(&rest[start..]);
        rest = &rest[start + consumed..];

        if let Some(Token::Open {
            name,
            self_closing: false,
        }) = &token
        {
            if is_raw_text_element(name) {
                // Skip the element body; its closing tag is read next round.
                let needle = format!("</{name}");
                rest = rest
                    .to_ascii_lowercase()
                    .find(&needle)
                    .map_or("", |pos| &rest[pos..]);
                continue;
            }
        }

        if let Some(token) = token {
            tokens.push(token);
        }
    }

    tokens
}

/// Byte offset of the next `<` that opens a tag. A `<` followed by anything
/// other than a letter, `/`, `!`, or `?` is literal text (`5 < 6`).
fn find_tag_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    s.match_indices('<').map(|(i, _)| i).find(|&i| {
        bytes
            .get(i + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
    })
}

/// Reads one tag starting at `tag[0] == '<'`. Returns the token (if the tag
/// means anything) and the number of bytes consumed. An unterminated tag
/// consumes the rest of the input.
fn read_tag(tag: &str) -> (Option<Token<'_>>, usize) {
    if tag.starts_with("<!--") {
        let consumed = tag[4..].find("-->").map_or(tag.len(), |end| 4 + end + 3);
        return (None, consumed);
    }

    let end = find_tag_end(tag);
    let consumed = end.map_or(tag.len(), |e| e + 1);
    let inner = &tag[1..end.unwrap_or(tag.len())];

    if inner.starts_with('!') || inner.starts_with('?') {
        return (None, consumed);
    }

    let closing = inner.starts_with('/');
    let body = inner.trim_start_matches('/');
    let name: String = body
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if name.is_empty() {
        return (None, consumed);
    }

    let token = if closing {
        Token::Close(name)
    } else {
        Token::Open {
            name,
            self_closing: inner.trim_end().ends_with('/'),
        }
    };
    (Some(token), consumed)
}

/// Position of the `>` closing a tag, skipping `>` inside quoted attribute
/// values.
fn find_tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in tag.as_bytes().iter().enumerate().skip(1) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

fn is_raw_text_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

fn build_tree(tokens: Vec<Token<'_>>) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<(BlockKind, Vec<Node>)> = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => {
                let decoded = decode_html_entities(text).into_owned();
                current(&mut stack, &mut root).push(Node::Text(decoded));
            }
            Token::Open { name, self_closing } => {
                if name == "br" {
                    current(&mut stack, &mut root).push(Node::LineBreak);
                } else if let Some(kind) = BlockKind::from_tag(&name) {
                    if !self_closing {
                        stack.push((kind, Vec::new()));
                    }
                }
            }
            Token::Close(name) => {
                if name == "br" {
                    current(&mut stack, &mut root).push(Node::LineBreak);
                } else if let Some(kind) = BlockKind::from_tag(&name) {
                    // Closing an outer block also closes anything left open
                    // inside it; a closer with no opener is ignored.
                    if let Some(pos) = stack.iter().rposition(|(k, _)| *k == kind) {
                        while stack.len() > pos {
                            close_top(&mut stack, &mut root);
                        }
                    }
                }
            }
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root);
    }
    root
}

fn current<'s>(
    stack: &'s mut [(BlockKind, Vec<Node>)],
    root: &'s mut Vec<Node>,
) -> &'s mut Vec<Node> {
    match stack.last_mut() {
        Some((_, children)) => children,
        None => root,
    }
}

fn close_top(stack: &mut Vec<(BlockKind, Vec<Node>)>, root: &mut Vec<Node>) {
    if let Some((kind, children)) = stack.pop() {
        current(stack, root).push(Node::Block { kind, children });
    }
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

fn render(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::LineBreak => out.push('\n'),
            Node::Block { kind, children } => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                if *kind == BlockKind::ListItem {
                    out.push_str(BULLET);
                }
                render(children, out);
                match kind {
                    BlockKind::ListItem => out.push('\n'),
                    BlockKind::Paragraph | BlockKind::Heading => out.push_str("\n\n"),
                }
            }
        }
    }
}

/// Collapses horizontal whitespace, trims every line, keeps at most one
/// blank line in a row, and trims the whole text.
fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0usize;

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            newlines += 1;
        }
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(if newlines >= 2 { "\n\n" } else { "\n" });
        }
        out.push_str(&collapsed);
        newlines = 0;
    }

    out
}

#[cfg(test)]
#[path = "description_test.rs"]
mod tests;
