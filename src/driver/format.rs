use std::fmt;

use crate::types::{VersionToken, VersionedError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Version,
    Path,
}

/// Parsed output template.
///
/// Syntax: `%(version)s` and `%(path)s` are placeholders, `%%` is a literal
/// percent sign. Anything else after `%` is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FormatTemplate {
    pub fn parse(source: &str) -> Result<Self, VersionedError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(idx) = rest.find('%') {
            literal.push_str(&rest[..idx]);
            let tail = &rest[idx + 1..];

            if let Some(after) = tail.strip_prefix('%') {
                literal.push('%');
                rest = after;
                continue;
            }

            let body = tail
                .strip_prefix('(')
                .ok_or_else(|| invalid(source, "expected `(` or `%` after `%`"))?;
            let close = body
                .find(')')
                .ok_or_else(|| invalid(source, "unterminated placeholder"))?;
            let name = &body[..close];
            let after = body[close + 1..].strip_prefix('s').ok_or_else(|| {
                invalid(source, format!("placeholder `{name}` must use the `s` conversion"))
            })?;

            let segment = match name {
                "version" => Segment::Version,
                "path" => Segment::Path,
                other => return Err(invalid(source, format!("unknown placeholder `{other}`"))),
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
            rest = after;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn render(&self, version: &VersionToken, path: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + path.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Version => out.push_str(version.as_str()),
                Segment::Path => out.push_str(path),
            }
        }
        out
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn invalid(source: &str, reason: impl fmt::Display) -> VersionedError {
    VersionedError::InvalidFormat(format!("{reason} in {source:?}"))
}
