//! PathPattern: compiles route paths (`/sdk`, `/:id(\d+)`, `/:catchAll(.*)*`)
//! into anchored regexes
//!
//! Syntax per segment:
//! - `name`          static text, matched literally
//! - `:name`         one segment, `[^/]+`
//! - `:name(re)`     one segment matching `re`
//! - modifier `?`    segment is optional
//! - modifier `*`    zero or more segments
//! - modifier `+`    one or more segments
//!
//! A trailing slash on the requested path is tolerated.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

const DEFAULT_SEGMENT: &str = "[^/]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    One,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param { name: String, re: String, modifier: Modifier },
}

/// Compiled route path with cached regex
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
    regex: Arc<Regex>,
}

impl PathPattern {
    pub fn parse(path: &str) -> Result<Self, String> {
        if !path.starts_with('/') {
            return Err("path must start with '/'".into());
        }
        let segments = if path == "/*" {
            // legacy wildcard
            vec![Segment::Param {
                name: "pathMatch".into(),
                re: ".*".into(),
                modifier: Modifier::ZeroOrMore,
            }]
        } else {
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(parse_segment)
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut names = Vec::new();
        let mut body = String::from("^");
        for seg in &segments {
            match seg {
                Segment::Static(text) => {
                    body.push('/');
                    body.push_str(&regex::escape(text));
                }
                Segment::Param { name, re, modifier } => {
                    if names.contains(name) {
                        return Err(format!("duplicate param ':{}'", name));
                    }
                    names.push(name.clone());
                    body.push_str(&match modifier {
                        Modifier::One => format!("/(?P<{name}>{re})"),
                        Modifier::Optional => format!("(?:/(?P<{name}>{re}))?"),
                        Modifier::ZeroOrMore => format!("(?:/(?P<{name}>(?:{re})(?:/(?:{re}))*))?"),
                        Modifier::OneOrMore => format!("/(?P<{name}>(?:{re})(?:/(?:{re}))*)"),
                    });
                }
            }
        }
        body.push_str("/?$");

        let regex = Regex::new(&body).map_err(|e| e.to_string())?;
        Ok(Self { segments, regex: Arc::new(regex) })
    }

    /// The pattern declares the root path (`/`).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The pattern matches every path: a single repeatable `.*` param.
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::Param { re, modifier: Modifier::ZeroOrMore, .. }] if re == ".*"
        )
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and return the captured params, or None.
    pub fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(path)?;
        Some(
            self.regex
                .capture_names()
                .flatten()
                .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
                .collect(),
        )
    }
}

fn parse_segment(raw: &str) -> Result<Segment, String> {
    let Some(rest) = raw.strip_prefix(':') else {
        if raw.contains(&['(', ')', '*', '?', '+'][..]) {
            return Err(format!("unsupported characters in static segment '{}'", raw));
        }
        return Ok(Segment::Static(raw.to_string()));
    };

    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(format!("invalid param name in '{}'", raw));
    }
    let name = rest[..name_len].to_string();
    let mut rest = &rest[name_len..];

    let mut re = DEFAULT_SEGMENT.to_string();
    if rest.starts_with('(') {
        let close = matching_paren(rest).ok_or_else(|| format!("unbalanced '(' in '{}'", raw))?;
        re = rest[1..close].to_string();
        if re.is_empty() {
            return Err(format!("empty regex in '{}'", raw));
        }
        rest = &rest[close + 1..];
    }

    let modifier = match rest {
        "" => Modifier::One,
        "?" => Modifier::Optional,
        "*" => Modifier::ZeroOrMore,
        "+" => Modifier::OneOrMore,
        other => return Err(format!("unexpected '{}' after param ':{}'", other, name)),
    };
    Ok(Segment::Param { name, re, modifier })
}

/// Index of the ')' closing the '(' at position 0.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
