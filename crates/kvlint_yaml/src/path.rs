//! Parsing of logical field paths such as `spec.containers[0].image`.
//!
//! A field path is always relative to the root of a document. The grammar accepted is:
//!
//! ```text
//! path    := segment ( "." name | "[" bracket "]" )*
//! segment := name | "[" bracket "]"
//! name    := quoted | plain
//! bracket := quoted | digits | plain-until-"]"
//! ```
//!
//! Quoted names use either `'` or `"` and may contain dots and brackets.
//! Bracketed digits select a sequence element, any other bracket content is a mapping key,
//! which is how map keys like `labels[app.kubernetes.io/name]` are written.

use crate::PathError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// A single step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A mapping key. Purely numeric keys also select sequence elements.
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A parsed, root-relative field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let segments = PathParser::new(raw).parse()?;
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The path exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct PathParser<'a> {
    raw: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> PathParser<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            chars: raw.char_indices().peekable(),
        }
    }

    fn err(&self, reason: &'static str) -> PathError {
        PathError::Syntax {
            path: self.raw.to_string(),
            reason,
        }
    }

    fn parse(mut self) -> Result<Vec<Segment>, PathError> {
        if self.raw.is_empty() {
            return Err(self.err("path is empty"));
        }

        let mut segments = vec![];
        match self.chars.peek() {
            Some((_, '[')) => segments.push(self.bracket()?),
            _ => segments.push(self.name()?),
        }

        while let Some((_, c)) = self.chars.next() {
            match c {
                '.' => segments.push(self.name()?),
                '[' => segments.push(self.bracket_body()?),
                _ => return Err(self.err("expected `.` or `[` after a segment")),
            }
        }
        Ok(segments)
    }

    fn name(&mut self) -> Result<Segment, PathError> {
        match self.chars.peek() {
            Some((_, quote @ '\'')) | Some((_, quote @ '"')) => {
                let quote = *quote;
                self.chars.next();
                return self.quoted(quote).map(Segment::Key);
            }
            None => return Err(self.err("expected a name after `.`")),
            _ => {}
        }

        let mut name = String::new();
        while let Some((_, c)) = self.chars.peek() {
            if *c == '.' || *c == '[' {
                break;
            }
            name.push(*c);
            self.chars.next();
        }
        if name.is_empty() {
            return Err(self.err("empty name"));
        }
        Ok(Segment::Key(name))
    }

    fn bracket(&mut self) -> Result<Segment, PathError> {
        self.chars.next();
        self.bracket_body()
    }

    /// Everything after an opening `[` up to and including the closing `]`.
    fn bracket_body(&mut self) -> Result<Segment, PathError> {
        if let Some((_, quote @ '\'')) | Some((_, quote @ '"')) = self.chars.peek() {
            let quote = *quote;
            self.chars.next();
            let key = self.quoted(quote)?;
            return match self.chars.next() {
                Some((_, ']')) => Ok(Segment::Key(key)),
                _ => Err(self.err("unterminated `[`")),
            };
        }

        let mut body = String::new();
        loop {
            match self.chars.next() {
                Some((_, ']')) => break,
                Some((_, c)) => body.push(c),
                None => return Err(self.err("unterminated `[`")),
            }
        }
        if body.is_empty() {
            return Err(self.err("empty brackets"));
        }
        if body.bytes().all(|b| b.is_ascii_digit()) {
            let idx = body.parse().map_err(|_| self.err("index is too large"))?;
            Ok(Segment::Index(idx))
        } else {
            Ok(Segment::Key(body))
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, PathError> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, c)) => out.push(c),
                    None => return Err(self.err("unterminated quote")),
                },
                Some((_, c)) if c == quote => return Ok(out),
                Some((_, c)) => out.push(c),
                None => return Err(self.err("unterminated quote")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(raw: &str) -> Vec<Segment> {
        FieldPath::parse(raw).unwrap().segments().to_vec()
    }

    fn key(k: &str) -> Segment {
        Segment::Key(k.to_string())
    }

    #[test]
    fn dotted_names() {
        assert_eq!(segments("spec.image"), vec![key("spec"), key("image")]);
        assert_eq!(segments("kind"), vec![key("kind")]);
    }

    #[test]
    fn indices() {
        assert_eq!(
            segments("spec.containers[0].image"),
            vec![key("spec"), key("containers"), Segment::Index(0), key("image")]
        );
        assert_eq!(segments("[2][10]"), vec![Segment::Index(2), Segment::Index(10)]);
    }

    #[test]
    fn numeric_names_stay_keys() {
        assert_eq!(
            segments("spec.containers.0.image"),
            vec![key("spec"), key("containers"), key("0"), key("image")]
        );
    }

    #[test]
    fn bracketed_map_keys() {
        assert_eq!(
            segments("metadata.labels[app.kubernetes.io/name]"),
            vec![key("metadata"), key("labels"), key("app.kubernetes.io/name")]
        );
        assert_eq!(
            segments("metadata.annotations['a]b']"),
            vec![key("metadata"), key("annotations"), key("a]b")]
        );
    }

    #[test]
    fn quoted_names() {
        assert_eq!(
            segments("metadata.'a.b'.c"),
            vec![key("metadata"), key("a.b"), key("c")]
        );
        assert_eq!(segments(r#""x\"y""#), vec![key("x\"y")]);
    }

    #[test]
    fn malformed_paths() {
        for raw in &["", "spec.", "spec..image", "a[0", "a[]", "'open", "a['x'", "a[0]b"] {
            match FieldPath::parse(raw) {
                Err(PathError::Syntax { path, .. }) => assert_eq!(&path, raw),
                other => panic!("expected `{}` to be rejected, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn display_keeps_the_raw_text() {
        let path = FieldPath::parse("spec.containers[0]").unwrap();
        assert_eq!(path.to_string(), "spec.containers[0]");
    }
}
