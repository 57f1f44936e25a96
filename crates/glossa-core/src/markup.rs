//! Inline pseudo-tags: `<1>...</1>` and `<2/>`.
//!
//! Templates mark spans for a rich-text renderer with numbered tags. This
//! module only splits a template into segments; deciding what tag `1`
//! becomes (a link, bold text) is up to the renderer. Key lookup and
//! interpolation never call into here.
//!
//! Parsing never fails: a tag that is not numeric, not closed, or closed out
//! of order is kept as literal text.

/// A piece of a marked-up template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Tag { index: usize, children: Vec<Segment> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Open(usize, &'a str),
    Close(usize, &'a str),
    SelfClosing(usize),
}

/// An open tag awaiting its close: index, literal source, children so far.
type Frame<'a> = (usize, &'a str, Vec<Segment>);

/// Split a template into text and tag segments.
pub fn parse(template: &str) -> Vec<Segment> {
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut top: Vec<Segment> = Vec::new();

    for token in tokenize(template) {
        match token {
            Token::Text(s) => push_text(innermost(&mut stack, &mut top), s),
            Token::SelfClosing(index) => innermost(&mut stack, &mut top).push(Segment::Tag {
                index,
                children: Vec::new(),
            }),
            Token::Open(index, raw) => stack.push((index, raw, Vec::new())),
            Token::Close(index, raw) => {
                if stack.last().is_some_and(|(open, _, _)| *open == index) {
                    if let Some((index, _, children)) = stack.pop() {
                        innermost(&mut stack, &mut top).push(Segment::Tag { index, children });
                    }
                } else {
                    push_text(innermost(&mut stack, &mut top), raw);
                }
            }
        }
    }

    // Unclosed tags: their opening marker becomes text, children are kept.
    while let Some((_, raw, children)) = stack.pop() {
        let parent = innermost(&mut stack, &mut top);
        push_text(parent, raw);
        for child in children {
            match child {
                Segment::Text(s) => push_text(parent, &s),
                tag => parent.push(tag),
            }
        }
    }

    top
}

fn innermost<'s>(stack: &'s mut [Frame<'_>], top: &'s mut Vec<Segment>) -> &'s mut Vec<Segment> {
    match stack.last_mut() {
        Some((_, _, children)) => children,
        None => top,
    }
}

/// Plain text with every recognized tag marker removed.
pub fn strip(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    flatten(&parse(template), &mut out);
    out
}

fn flatten(segments: &[Segment], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(s) => out.push_str(s),
            Segment::Tag { children, .. } => flatten(children, out),
        }
    }
}

fn push_text(segments: &mut Vec<Segment>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut() {
        last.push_str(s);
    } else {
        segments.push(Segment::Text(s.to_string()));
    }
}

fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = template[pos..].find('<') {
        let at = pos + offset;
        match tag_at(&template[at..]) {
            Some((token, len)) => {
                if text_start < at {
                    tokens.push(Token::Text(&template[text_start..at]));
                }
                tokens.push(token);
                pos = at + len;
                text_start = pos;
            }
            None => pos = at + 1,
        }
    }
    if text_start < template.len() {
        tokens.push(Token::Text(&template[text_start..]));
    }
    tokens
}

/// Recognize `<N>`, `</N>` or `<N/>` at the start of `s`.
fn tag_at(s: &str) -> Option<(Token<'_>, usize)> {
    let end = s.find('>')?;
    let inner = &s[1..end];
    let raw = &s[..=end];
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };
    let (self_closing, digits) = match body.strip_suffix('/') {
        Some(digits) => (true, digits),
        None => (false, body),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || (closing && self_closing) {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    let token = match (closing, self_closing) {
        (true, _) => Token::Close(index, raw),
        (false, true) => Token::SelfClosing(index),
        (false, false) => Token::Open(index, raw),
    };
    Some((token, end + 1))
}
