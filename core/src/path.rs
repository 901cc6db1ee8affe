//! Path parsing (component G): tokenizing a dotted/bracketed path string
//! into an ordered sequence of [`Step`]s.
//!
//! The grammar is deliberately permissive: there is no such thing as a
//! malformed path string. Anything the tokenizer can't make sense of (an
//! empty `[]`, a non-numeric non-`*` bracket body, an empty segment between
//! two dots) is silently dropped rather than rejected. This is a product
//! decision for an accessor library, not an oversight. See the module docs
//! on [`crate::access`] for how the resulting steps are consumed.

/// One step of a parsed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Descend into a map by key.
    Key(String),
    /// Descend into an array by a 0-based index.
    Index(usize),
    /// Expand across all children of a map or array.
    Wildcard,
}

/// Parses a path string into an ordered sequence of steps.
///
/// No input is ever rejected: `parse_path` always returns (possibly an
/// empty `Vec` of) steps. See the module docs for the edge-case policy.
pub fn parse_path(text: &str) -> Vec<Step> {
    fn flush_segment(segment: &mut String, steps: &mut Vec<Step>) {
        if !segment.is_empty() {
            if segment == "*" {
                steps.push(Step::Wildcard);
            } else {
                steps.push(Step::Key(std::mem::take(segment)));
            }
        }
    }

    let mut steps = Vec::new();
    let mut chars = text.chars();
    let mut segment = String::new();

    while let Some(c) = chars.next() {
        match c {
            '.' => flush_segment(&mut segment, &mut steps),
            '[' => {
                flush_segment(&mut segment, &mut steps);
                let mut body = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    body.push(c);
                }
                if body == "*" {
                    steps.push(Step::Wildcard);
                } else if let Ok(index) = body.parse::<usize>() {
                    steps.push(Step::Index(index));
                }
                // Anything else (empty, negative, non-numeric) yields no step.
            }
            c => segment.push(c),
        }
    }
    flush_segment(&mut segment, &mut steps);

    steps
}
