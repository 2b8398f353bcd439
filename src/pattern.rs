use std::fmt;

use serde::Serialize;

/// Marks a prefix annotation whose columns carry a group index.
pub const WILDCARD: char = '*';

/// How a member finds its columns in a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NamingPattern {
    /// No annotation: the lowercase member name, first match wins.
    Implicit { name: String },
    /// `#[prefix("literal")]`: every column starting with the literal.
    Prefix { literal: String },
    /// `#[prefix("literal*")]`: columns `literal<index><suffix>`, one group per index.
    Wildcard { literal: String },
}

impl NamingPattern {
    pub fn implicit(member: &str) -> Self {
        NamingPattern::Implicit {
            name: member.to_lowercase(),
        }
    }

    /// Reads a prefix annotation. Only a trailing `*` is a wildcard marker.
    pub fn prefix(annotation: &str) -> Self {
        match annotation.strip_suffix(WILDCARD) {
            Some(literal) => NamingPattern::Wildcard {
                literal: literal.to_string(),
            },
            None => NamingPattern::Prefix {
                literal: annotation.to_string(),
            },
        }
    }

    pub fn literal(&self) -> &str {
        match self {
            NamingPattern::Implicit { name } => name,
            NamingPattern::Prefix { literal } | NamingPattern::Wildcard { literal } => literal,
        }
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, NamingPattern::Implicit { .. })
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, NamingPattern::Wildcard { .. })
    }
}

impl fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingPattern::Wildcard { literal } => write!(f, "{literal}{WILDCARD}"),
            other => f.write_str(other.literal()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_pattern_lowercases_member_name() {
        let pattern = NamingPattern::implicit("RaceID");
        assert_eq!(pattern.literal(), "raceid");
        assert!(pattern.is_implicit());
    }

    #[test]
    fn trailing_star_marks_wildcard() {
        assert_eq!(
            NamingPattern::prefix("lane*"),
            NamingPattern::Wildcard {
                literal: "lane".into()
            }
        );
        assert_eq!(
            NamingPattern::prefix("Race Number"),
            NamingPattern::Prefix {
                literal: "Race Number".into()
            }
        );
        assert_eq!(
            NamingPattern::prefix("a*b"),
            NamingPattern::Prefix {
                literal: "a*b".into()
            }
        );
    }

    #[test]
    fn display_restores_annotation_text() {
        assert_eq!(NamingPattern::prefix("laptime*").to_string(), "laptime*");
        assert_eq!(NamingPattern::implicit("Place").to_string(), "place");
    }
}
