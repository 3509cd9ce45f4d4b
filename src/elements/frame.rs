use std::{fmt, fmt::Write as _, str::FromStr};

use egui::Pos2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    ClassFrame,
    ObjectFrame,
}

impl FrameKind {
    pub const ALL: [FrameKind; 2] = [FrameKind::ClassFrame, FrameKind::ObjectFrame];

    pub fn label(self) -> &'static str {
        match self {
            FrameKind::ClassFrame => "class frame",
            FrameKind::ObjectFrame => "object frame",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrameKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        FrameKind::ALL
            .into_iter()
            .find(|k| k.label().replace(' ', "") == normalized)
            .ok_or_else(|| Error::UnknownKind {
                category: "frame",
                value: s.to_string(),
            })
    }
}

/// Named record with ordered slot/value pairs.
///
/// Slot order is insertion order; overwriting a slot keeps its original position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    name: String,
    kind: FrameKind,
    location: Pos2,
    slots: IndexMap<String, String>,
}

impl Frame {
    pub(crate) fn new(name: String, kind: FrameKind, location: Pos2) -> Self {
        Self {
            name,
            kind,
            location,
            slots: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Pos2) {
        self.location = location;
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Inserts or overwrites a slot. Returns the previous value if there was one.
    pub(crate) fn upsert_slot(&mut self, name: String, value: String) -> Option<String> {
        self.slots.insert(name, value)
    }

    /// Multi-line summary used by frame inspectors.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Frame: {}", self.name);
        let _ = writeln!(out, "Kind: {}", self.kind);
        let _ = writeln!(
            out,
            "Position: ({:.0}, {:.0})",
            self.location.x, self.location.y
        );
        out.push_str("\nSlots:\n");
        for (name, value) in &self.slots {
            let _ = writeln!(out, "  {name}: {value}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_slot_position() {
        let mut f = Frame::new("Canary".to_string(), FrameKind::ObjectFrame, Pos2::ZERO);
        f.upsert_slot("Type".to_string(), "Bird".to_string());
        f.upsert_slot("Color".to_string(), "Yellow".to_string());
        let prev = f.upsert_slot("Type".to_string(), "Songbird".to_string());

        assert_eq!(prev.as_deref(), Some("Bird"));
        let slots: Vec<_> = f.slots().collect();
        assert_eq!(slots, vec![("Type", "Songbird"), ("Color", "Yellow")]);
    }

    #[test]
    fn describe_lists_slots_in_order() {
        let mut f = Frame::new(
            "Penguin".to_string(),
            FrameKind::ObjectFrame,
            Pos2::new(900., 200.),
        );
        f.upsert_slot("Type".to_string(), "Bird".to_string());
        f.upsert_slot("Color".to_string(), "Black".to_string());

        let text = f.describe();
        assert!(text.starts_with("Frame: Penguin\nKind: object frame\nPosition: (900, 200)\n"));
        let type_at = text.find("  Type: Bird").unwrap();
        let color_at = text.find("  Color: Black").unwrap();
        assert!(type_at < color_at);
    }

    #[test]
    fn kind_parses_labels() {
        assert_eq!("class frame".parse::<FrameKind>(), Ok(FrameKind::ClassFrame));
        assert_eq!("ObjectFrame".parse::<FrameKind>(), Ok(FrameKind::ObjectFrame));
        assert!("slot".parse::<FrameKind>().is_err());
    }
}
