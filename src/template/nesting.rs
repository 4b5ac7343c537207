//! Bounds how deeply a template may nest before it reaches the parser.
//!
//! The parser and executor recurse once per `(`, block and `else if`, so
//! unbounded nesting in a request body would exhaust the worker stack.
//! This scan is iterative.

/// Deepest combined nesting of blocks and parentheses a template may use.
pub const MAX_NESTING: usize = 64;

const BLOCKS: [&str; 3] = ["if", "range", "with"];
const UNSUPPORTED: [&str; 3] = ["define", "template", "block"];

pub(crate) fn check_nesting(source: &str) -> Result<(), String> {
    // One frame per open block; `else if` / `else with` deepen the current one.
    let mut frames: Vec<usize> = Vec::new();
    let mut open = 0usize;
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        let action = &rest[start + 2..];
        let (body_len, consumed, parens) = scan_action(action);
        let inner = &action[..body_len];
        rest = &action[consumed..];

        let (first, after) = leading_word(trim_marker(inner));
        match first {
            kw if BLOCKS.contains(&kw) => {
                frames.push(1);
                open += 1;
            }
            "else" => {
                let (second, _) = leading_word(after);
                if second == "if" || second == "with" {
                    if let Some(top) = frames.last_mut() {
                        *top += 1;
                        open += 1;
                    }
                }
            }
            "end" => {
                if let Some(depth) = frames.pop() {
                    open -= depth;
                }
            }
            kw if UNSUPPORTED.contains(&kw) => {
                return Err(format!("{{{{{}}}}} is not supported", kw));
            }
            _ => {}
        }

        if open + parens > MAX_NESTING {
            return Err(format!("max nesting depth {} exceeded", MAX_NESTING));
        }
    }
    Ok(())
}

/// Strip a `- ` left trim marker. `{{-3}}` is a number, not a marker.
fn trim_marker(action: &str) -> &str {
    match action.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => action,
    }
}

fn leading_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Returns the body length before `}}`, the bytes consumed including it,
/// and the deepest paren nesting. Quoted text and comments are skipped.
fn scan_action(s: &str) -> (usize, usize, usize) {
    let bytes = s.as_bytes();
    let (mut i, mut depth, mut max) = (0, 0usize, 0usize);
    while i < bytes.len() {
        match bytes[i] {
            b'}' if bytes.get(i + 1) == Some(&b'}') => return (i, i + 2, max),
            b'"' | b'\'' => i = closing_quote(bytes, i),
            b'`' => {
                i = bytes[i + 1..]
                    .iter()
                    .position(|&b| b == b'`')
                    .map_or(bytes.len(), |p| i + 1 + p)
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = bytes[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map_or(bytes.len(), |p| i + 2 + p + 1)
            }
            b'(' => {
                depth += 1;
                max = max.max(depth);
            }
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    (bytes.len(), bytes.len(), max)
}

fn closing_quote(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return j,
            _ => j += 1,
        }
    }
    bytes.len()
}
