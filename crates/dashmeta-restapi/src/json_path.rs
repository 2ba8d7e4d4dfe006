//! JSON path projection over API responses.
//!
//! Supported syntax:
//! - dotted fields: `_embedded.spaces`, with an optional `$` / `$.` root
//! - `[*]` every element of an array (or every value of an object)
//! - `[n]` one array element
//! - `[a,b]` or `.[a]` several fields of the current node, in order
//! - `(p1) | (p2)` alternatives, evaluated independently
//!
//! Evaluation yields *slots*: one per position reached, empty when a field is
//! missing or `null`. Positions below a wildcard are kept even when the leaf
//! is missing, so alternatives sharing a wildcard prefix stay aligned.

use dashmeta_core::ExtractError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Field(String),
    Wildcard,
    Index(usize),
    Fields(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    expr: String,
    alternatives: Vec<Path>,
}

impl JsonPath {
    pub fn parse(expr: &str) -> Result<Self, ExtractError> {
        let alternatives = expr
            .split('|')
            .map(|alt| parse_path(strip_parens(alt.trim())))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| ExtractError::JsonPath(format!("`{}`: {}", expr, reason)))?;

        Ok(Self {
            expr: expr.to_string(),
            alternatives,
        })
    }

    /// Whether the expression combines alternatives with `|`.
    pub fn is_union(&self) -> bool {
        self.alternatives.len() > 1
    }

    pub fn alternatives(&self) -> &[Path] {
        &self.alternatives
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

impl std::fmt::Display for JsonPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.expr)
    }
}

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Evaluate against `root`, keeping one slot per position reached.
    pub fn slots<'a>(&self, root: &'a Value) -> Vec<Option<&'a Value>> {
        let mut current: Vec<Option<&'a Value>> = vec![Some(root)];

        for segment in &self.segments {
            let mut next = Vec::with_capacity(current.len());
            for slot in current {
                match segment {
                    Segment::Field(name) => next.push(slot.and_then(|v| v.get(name.as_str()))),
                    Segment::Index(i) => next.push(slot.and_then(|v| v.get(*i))),
                    Segment::Wildcard => match slot {
                        Some(Value::Array(items)) => next.extend(items.iter().map(Some)),
                        Some(Value::Object(map)) => next.extend(map.values().map(Some)),
                        _ => {}
                    },
                    Segment::Fields(names) => next.extend(
                        names
                            .iter()
                            .map(|name| slot.and_then(|v| v.get(name.as_str()))),
                    ),
                }
            }
            current = next;
        }

        current
            .into_iter()
            .map(|slot| slot.filter(|v| !v.is_null()))
            .collect()
    }
}

fn strip_parens(s: &str) -> &str {
    match s.strip_prefix('(').and_then(|inner| inner.strip_suffix(')')) {
        Some(inner) => inner.trim(),
        None => s,
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[derive(PartialEq)]
enum Expect {
    Start,
    Segment,
    Separator,
}

fn parse_path(src: &str) -> Result<Path, String> {
    let mut rest = src;
    let mut expect = Expect::Start;
    if let Some(after_root) = rest.strip_prefix('$') {
        rest = after_root.strip_prefix('.').unwrap_or(after_root);
        expect = if after_root.starts_with('.') {
            Expect::Segment
        } else {
            Expect::Start
        };
    }

    let mut segments = Vec::new();
    while let Some(c) = rest.chars().next() {
        match c {
            '.' if expect == Expect::Separator => {
                rest = &rest[1..];
                expect = Expect::Segment;
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| "unclosed `[`".to_string())?;
                segments.push(parse_bracket(&rest[1..close])?);
                rest = &rest[close + 1..];
                expect = Expect::Separator;
            }
            c if is_ident_char(c) && expect != Expect::Separator => {
                let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
                segments.push(Segment::Field(rest[..end].to_string()));
                rest = &rest[end..];
                expect = Expect::Separator;
            }
            other => return Err(format!("unexpected `{}`", other)),
        }
    }

    if expect == Expect::Segment {
        return Err("path ends with `.`".to_string());
    }
    if segments.is_empty() {
        return Err("empty path".to_string());
    }
    Ok(Path { segments })
}

fn parse_bracket(inner: &str) -> Result<Segment, String> {
    let inner = inner.trim();
    if inner == "*" {
        return Ok(Segment::Wildcard);
    }
    if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
        return inner
            .parse()
            .map(Segment::Index)
            .map_err(|e| format!("bad index `{}`: {}", inner, e));
    }

    let names = inner
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"'))
        .map(|name| {
            if !name.is_empty() && name.chars().all(is_ident_char) {
                Ok(name.to_string())
            } else {
                Err(format!("bad field `{}` in `[{}]`", name, inner))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Segment::Fields(names))
}
