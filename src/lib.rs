mod editor;
mod elements;
mod error;
mod example;
mod frames;
mod graph;
mod settings;
mod transform;

pub mod events;
pub mod layouts;
pub mod style;

pub use self::editor::{Editor, Surface};
pub use self::elements::{Frame, FrameKind, Node, NodeKind, Relation, RelationKind, RelationRef};
pub use self::error::{Error, Result};
pub use self::frames::FrameModel;
pub use self::graph::GraphModel;
pub use self::settings::{
    Settings, SettingsCanvas, SettingsFrame, SettingsNavigation, SettingsNode, SettingsPlacement,
};
pub use self::transform::ViewTransform;

pub use self::layouts::force_directed::{ForceDirected, ForceDirectedState};
pub use self::layouts::{Placed, PlacementSearch, Strategy};
