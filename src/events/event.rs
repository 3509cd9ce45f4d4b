use serde::{Deserialize, Serialize};

use crate::{FrameKind, NodeKind, RelationKind, Surface};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeAdded {
    pub name: String,
    pub kind: NodeKind,
    pub location: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeRemoved {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeMove {
    pub name: String,
    pub new_pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadRelationAdded {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadFrameCreated {
    pub name: String,
    pub kind: FrameKind,
    pub location: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadFrameRemoved {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadFrameMove {
    pub name: String,
    pub new_pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadSlotSet {
    pub frame: String,
    pub slot: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LayoutKind {
    Relax,
    Tiered,
    Grid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadLayout {
    pub surface: Surface,
    pub layout: LayoutKind,
    pub iterations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPan {
    pub surface: Surface,
    pub diff: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadZoom {
    pub surface: Surface,
    pub pivot: [f32; 2],
    /// Factor actually applied after clamping
    pub factor: f32,
}

/// Notification published by [`crate::Editor`] after a successful mutation or layout pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    NodeAdded(PayloadNodeAdded),
    NodeRemoved(PayloadNodeRemoved),
    NodeMove(PayloadNodeMove),
    RelationAdded(PayloadRelationAdded),
    GraphCleared,
    FrameCreated(PayloadFrameCreated),
    FrameRemoved(PayloadFrameRemoved),
    FrameMove(PayloadFrameMove),
    SlotSet(PayloadSlotSet),
    FramesCleared,
    /// Both models were replaced by the bundled example
    ExampleLoaded,
    Layout(PayloadLayout),
    Pan(PayloadPan),
    Zoom(PayloadZoom),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contract_pan() {
        let event = Event::Pan(PayloadPan {
            surface: Surface::Network,
            diff: [1.0, 2.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Pan":{"surface":"Network","diff":[1.0,2.0]}}"#);

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_relation_added() {
        let event = Event::RelationAdded(PayloadRelationAdded {
            from: "canary".to_string(),
            to: "bird".to_string(),
            kind: RelationKind::IsA,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"RelationAdded":{"from":"canary","to":"bird","kind":"IsA"}}"#
        );
    }

    #[test]
    fn test_contract_unit_variants() {
        let json = serde_json::to_string(&Event::GraphCleared).unwrap();
        assert_eq!(json, r#""GraphCleared""#);
        let back: Event = serde_json::from_str(r#""FramesCleared""#).unwrap();
        assert_eq!(back, Event::FramesCleared);
    }
}
