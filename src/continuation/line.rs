use std::sync::LazyLock;

use regex::Regex;

static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)(?P<marker>[-*])[ \t](?P<content>.*)$")
        .expect("bullet line pattern is valid")
});

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)(?P<number>[0-9]+)\.[ \t](?P<content>.*)$")
        .expect("numbered line pattern is valid")
});

/// Markdown list classification of a single line.
///
/// Borrowed from the line it was computed from; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Plain,
    Bullet {
        indent: &'a str,
        marker: char,
        content: &'a str,
    },
    Numbered {
        indent: &'a str,
        number: u64,
        content: &'a str,
    },
}

impl LineKind<'_> {
    pub const fn is_list(&self) -> bool {
        !matches!(self, Self::Plain)
    }

    /// List item whose content is blank once trimmed.
    ///
    /// `"- text   "` is not empty; `"-    "` is.
    pub fn has_empty_content(&self) -> bool {
        match self {
            Self::Plain => false,
            Self::Bullet { content, .. } | Self::Numbered { content, .. } => {
                content.trim().is_empty()
            }
        }
    }

    /// Exactly an unindented marker and its separator: `"- "`, `"* "`, `"12. "`.
    pub const fn is_bare_marker(&self) -> bool {
        match self {
            Self::Plain => false,
            Self::Bullet {
                indent, content, ..
            }
            | Self::Numbered {
                indent, content, ..
            } => indent.is_empty() && content.is_empty(),
        }
    }

    /// Prefix for the item that follows this one.
    ///
    /// Numbered items count up from their own number only.
    pub fn continuation(&self) -> Option<String> {
        match self {
            Self::Plain => None,
            Self::Bullet { indent, marker, .. } => Some(format!("{indent}{marker} ")),
            Self::Numbered { indent, number, .. } => {
                Some(format!("{indent}{}. ", number.saturating_add(1)))
            }
        }
    }
}

/// Classify `line`, which must not contain a newline.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(caps) = BULLET_LINE.captures(line) {
        let marker = caps["marker"].chars().next().unwrap_or('-');
        return LineKind::Bullet {
            indent: caps.name("indent").map_or("", |m| m.as_str()),
            marker,
            content: caps.name("content").map_or("", |m| m.as_str()),
        };
    }

    if let Some(caps) = NUMBERED_LINE.captures(line) {
        // Digit runs too long for u64 are treated as prose.
        let Ok(number) = caps["number"].parse::<u64>() else {
            return LineKind::Plain;
        };
        return LineKind::Numbered {
            indent: caps.name("indent").map_or("", |m| m.as_str()),
            number,
            content: caps.name("content").map_or("", |m| m.as_str()),
        };
    }

    LineKind::Plain
}
