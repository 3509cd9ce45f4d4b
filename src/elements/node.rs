use std::{fmt, str::FromStr};

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Role of a vertex in the semantic network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Class,
    Object,
    Property,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Class, NodeKind::Object, NodeKind::Property];

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Object => "object",
            NodeKind::Property => "property",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NodeKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownKind {
                category: "node",
                value: s.to_string(),
            })
    }
}

/// Named, kinded vertex of the semantic network.
///
/// Only the location is mutable after creation; layout passes and drags move it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    kind: NodeKind,
    location: Pos2,
}

impl Node {
    pub(crate) fn new(name: String, kind: NodeKind, location: Pos2) -> Self {
        Self {
            name,
            kind,
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Pos2) {
        self.location = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Class".parse::<NodeKind>(), Ok(NodeKind::Class));
        assert_eq!(" property ".parse::<NodeKind>(), Ok(NodeKind::Property));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "verb".parse::<NodeKind>(),
            Err(Error::UnknownKind {
                category: "node",
                value: "verb".to_string()
            })
        );
    }
}
