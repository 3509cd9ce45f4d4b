use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Label carried by a directed relation between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    IsA,
    Has,
    CanDo,
    HasColor,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::IsA,
        RelationKind::Has,
        RelationKind::CanDo,
        RelationKind::HasColor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RelationKind::IsA => "is a",
            RelationKind::Has => "has",
            RelationKind::CanDo => "can do",
            RelationKind::HasColor => "has color",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RelationKind {
    type Err = Error;

    /// Accepts the display label as well as `snake_case` and `CamelCase` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        RelationKind::ALL
            .into_iter()
            .find(|k| k.label().replace(' ', "") == normalized)
            .ok_or_else(|| Error::UnknownKind {
                category: "relation",
                value: s.to_string(),
            })
    }
}

/// Edge payload stored in the graph. Endpoints are owned by the graph itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    kind: RelationKind,
}

impl Relation {
    pub(crate) fn new(kind: RelationKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}

/// Borrowed view of a relation with its endpoint names resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationRef<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: RelationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_spellings() {
        for s in ["is a", "is_a", "IsA", "ISA"] {
            assert_eq!(s.parse::<RelationKind>(), Ok(RelationKind::IsA), "{s}");
        }
        assert_eq!("has color".parse::<RelationKind>(), Ok(RelationKind::HasColor));
        assert_eq!("can-do".parse::<RelationKind>(), Ok(RelationKind::CanDo));
    }

    #[test]
    fn rejects_open_set_values() {
        assert!(matches!(
            "eats".parse::<RelationKind>(),
            Err(Error::UnknownKind { category: "relation", .. })
        ));
    }
}
