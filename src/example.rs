use egui::Pos2;
use log::info;

use crate::{events::Event, Editor, FrameKind, NodeKind, RelationKind, Result};

const NODES: [(&str, NodeKind, [f32; 2]); 13] = [
    ("bird", NodeKind::Class, [450., 100.]),
    ("animal", NodeKind::Class, [450., 50.]),
    ("ostrich", NodeKind::Object, [200., 200.]),
    ("canary", NodeKind::Object, [400., 200.]),
    ("thrush", NodeKind::Object, [600., 200.]),
    ("penguin", NodeKind::Object, [800., 200.]),
    ("fly", NodeKind::Property, [700., 300.]),
    ("walk", NodeKind::Property, [100., 300.]),
    ("sing", NodeKind::Property, [500., 300.]),
    ("plumage", NodeKind::Property, [200., 50.]),
    ("yellow", NodeKind::Property, [300., 450.]),
    ("black", NodeKind::Property, [700., 450.]),
    ("brown", NodeKind::Property, [500., 450.]),
];

const RELATIONS: [(&str, &str, RelationKind); 15] = [
    ("ostrich", "bird", RelationKind::IsA),
    ("canary", "bird", RelationKind::IsA),
    ("thrush", "bird", RelationKind::IsA),
    ("penguin", "bird", RelationKind::IsA),
    ("bird", "animal", RelationKind::IsA),
    ("ostrich", "walk", RelationKind::CanDo),
    ("bird", "plumage", RelationKind::Has),
    ("penguin", "black", RelationKind::HasColor),
    ("penguin", "walk", RelationKind::CanDo),
    ("canary", "yellow", RelationKind::HasColor),
    ("thrush", "brown", RelationKind::HasColor),
    ("thrush", "sing", RelationKind::CanDo),
    ("canary", "sing", RelationKind::CanDo),
    ("thrush", "fly", RelationKind::CanDo),
    ("canary", "fly", RelationKind::CanDo),
];

type SampleFrame = (&'static str, FrameKind, [f32; 2], [(&'static str, &'static str); 5]);

const FRAMES: [SampleFrame; 4] = [
    (
        "Frame: Bird",
        FrameKind::ClassFrame,
        [300., 200.],
        [
            ("Class", "Bird"),
            ("Inherits", "Animal"),
            ("Has", "Plumage"),
            ("Can", "Fly, Sing"),
            ("Examples", "Ostrich, Canary, Thrush, Penguin"),
        ],
    ),
    (
        "Frame: Canary",
        FrameKind::ObjectFrame,
        [600., 200.],
        [
            ("Object", "Canary"),
            ("Type", "Bird"),
            ("Color", "Yellow"),
            ("Can", "Fly, Sing"),
            ("Traits", "Small, Songbird"),
        ],
    ),
    (
        "Frame: Penguin",
        FrameKind::ObjectFrame,
        [900., 200.],
        [
            ("Object", "Penguin"),
            ("Type", "Bird"),
            ("Color", "Black"),
            ("Can", "Walk, Swim"),
            ("Traits", "Flightless, Lives in Antarctica"),
        ],
    ),
    (
        "Frame: Ostrich",
        FrameKind::ObjectFrame,
        [300., 400.],
        [
            ("Object", "Ostrich"),
            ("Type", "Bird"),
            ("Color", "Brown"),
            ("Can", "Walk, Run"),
            ("Traits", "Flightless, Largest bird"),
        ],
    ),
];

impl Editor {
    /// Replaces the network and the frames with the bundled bird taxonomy.
    ///
    /// Locations are fixed; no placement or layout runs. Calling it again restores the sample
    /// after edits.
    ///
    /// # Errors
    /// Only if the bundled data violated a model invariant.
    pub fn load_example(&mut self) -> Result<()> {
        let (graph, frames) = self.models_mut();
        graph.clear();
        frames.clear();

        for (name, kind, [x, y]) in NODES {
            graph.add_node(name, kind, Pos2::new(x, y))?;
        }
        for (from, to, kind) in RELATIONS {
            graph.add_relation(from, to, kind)?;
        }
        for (name, kind, [x, y], slots) in FRAMES {
            frames.create_frame(name, kind, Pos2::new(x, y))?;
            for (slot, value) in slots {
                frames.add_slot(name, slot, value)?;
            }
        }

        info!(
            "example loaded: {} node(s), {} relation(s), {} frame(s)",
            self.node_count(),
            self.relation_count(),
            self.frame_count()
        );
        self.publish(Event::ExampleLoaded);
        Ok(())
    }
}
