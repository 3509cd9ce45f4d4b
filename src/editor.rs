use std::fmt;

use egui::{Pos2, Vec2};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::non_blank,
    events::{
        Event, EventSink, LayoutKind, PayloadFrameCreated, PayloadFrameMove, PayloadFrameRemoved,
        PayloadLayout, PayloadNodeAdded, PayloadNodeMove, PayloadNodeRemoved, PayloadPan,
        PayloadRelationAdded, PayloadSlotSet, PayloadZoom,
    },
    layouts::{
        clamp_into, force_directed::ForceDirected, grid_layout, tiered_layout, PlacementSearch,
        Strategy,
    },
    style, Error, Frame, FrameKind, FrameModel, GraphModel, Node, NodeKind, RelationKind, Result,
    Settings, ViewTransform,
};

/// Distance of the class and property rows from the top and bottom edges in the tiered layout.
const TIER_INSET: f32 = 80.;

/// One of the two independently zoomed and panned drawing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Network,
    Frames,
}

/// Entry point for the presentation layer.
///
/// Owns the semantic network, the frames, one [`ViewTransform`] per [`Surface`] and the layout
/// machinery. Mutations validate their input and return typed errors; placement of new entities
/// and layout passes run synchronously inside the call. Pointer positions handed to the drag and
/// hit-test methods are screen coordinates and are mapped through the surface's transform.
pub struct Editor {
    settings: Settings,
    graph: GraphModel,
    frames: FrameModel,
    network_view: ViewTransform,
    frames_view: ViewTransform,
    force: ForceDirected,
    rng: StdRng,
    /// Last measured time of a layout pass (milliseconds)
    last_layout_time_ms: f32,
    sink: Option<Box<dyn EventSink>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("settings", &self.settings)
            .field("graph", &self.graph)
            .field("frames", &self.frames)
            .field("network_view", &self.network_view)
            .field("frames_view", &self.frames_view)
            .field("last_layout_time_ms", &self.last_layout_time_ms)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Editor whose random placement fallback is seeded from the OS.
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Editor with a reproducible random placement fallback.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, rng: StdRng) -> Self {
        Self {
            network_view: ViewTransform::new(&settings.navigation),
            frames_view: ViewTransform::new(&settings.navigation),
            force: ForceDirected::from_state(settings.force.clone()),
            graph: GraphModel::new(),
            frames: FrameModel::new(),
            rng,
            last_layout_time_ms: 0.,
            sink: None,
            settings,
        }
    }

    /// Attaches a receiver for [`Event`]s, replacing any previous one.
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.set_event_sink(sink);
        self
    }

    pub fn set_event_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn frames(&self) -> &FrameModel {
        &self.frames
    }

    pub fn view(&self, surface: Surface) -> &ViewTransform {
        match surface {
            Surface::Network => &self.network_view,
            Surface::Frames => &self.frames_view,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.relation_count()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_layout_time_ms(&self) -> f32 {
        self.last_layout_time_ms
    }

    // ---- semantic network ----

    /// Adds a node at a collision-free spot near `hint` (the canvas center when `None`).
    ///
    /// Returns the chosen location.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] or [`Error::DuplicateName`]; nothing is placed in that case.
    pub fn add_node(&mut self, name: &str, kind: NodeKind, hint: Option<Pos2>) -> Result<Pos2> {
        let name = non_blank(name, "node name")?;
        if self.graph.contains(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let hint = hint.unwrap_or_else(|| self.settings.network_canvas.rect().center());
        let location = self.place_new_node(hint);
        self.graph.add_node(name, kind, location)?;
        self.publish(Event::NodeAdded(PayloadNodeAdded {
            name: name.to_string(),
            kind,
            location: [location.x, location.y],
        }));
        Ok(location)
    }

    /// Position a node inserted now near `hint` would get. Does not change the model.
    pub fn place_new_node(&mut self, hint: Pos2) -> Pos2 {
        let occupied = self.graph.locations();
        let placed = PlacementSearch::for_nodes(&self.settings).find(hint, &occupied, &mut self.rng);
        if placed.strategy == Strategy::Fallback {
            warn!(
                "no free spot for a node near {hint:?} after {} probes, placed randomly at {:?}",
                self.settings.placement.max_attempts, placed.location
            );
        }
        placed.location
    }

    /// Removes a node and every relation touching it.
    ///
    /// # Errors
    /// [`Error::UnknownNode`].
    pub fn remove_node(&mut self, name: &str) -> Result<Node> {
        let node = self.graph.remove_node(name)?;
        self.publish(Event::NodeRemoved(PayloadNodeRemoved {
            name: node.name().to_string(),
        }));
        Ok(node)
    }

    pub fn clear_graph(&mut self) {
        self.graph.clear();
        self.publish(Event::GraphCleared);
    }

    /// # Errors
    /// See [`GraphModel::add_relation`].
    pub fn add_relation(&mut self, from: &str, to: &str, kind: RelationKind) -> Result<()> {
        self.graph.add_relation(from, to, kind)?;
        self.publish(Event::RelationAdded(PayloadRelationAdded {
            from: from.trim().to_string(),
            to: to.trim().to_string(),
            kind,
        }));
        Ok(())
    }

    /// Moves a node under the pointer.
    ///
    /// The drop point is clamped into the canvas. When it lands on another node it is moved to
    /// the nearest free spot of the drag spiral; if the spiral finds none the node stays where it
    /// was dropped.
    ///
    /// # Errors
    /// [`Error::UnknownNode`].
    pub fn drag_node(&mut self, name: &str, screen_pos: Pos2) -> Result<Pos2> {
        if !self.graph.contains(name) {
            return Err(Error::UnknownNode(name.to_string()));
        }
        let r = self.settings.node.radius;
        let canvas = self.settings.network_canvas.rect();
        let target = clamp_into(
            canvas.shrink(r),
            self.network_view.screen_to_canvas_pos(screen_pos),
        );

        let others: Vec<Pos2> = self
            .graph
            .nodes()
            .filter(|n| n.name() != name)
            .map(Node::location)
            .collect();
        let search = PlacementSearch::for_drag(&self.settings);
        let blocked = others
            .iter()
            .any(|p| p.distance(target) < search.min_separation());
        let location = if blocked {
            search
                .find_on_spiral(target, &others)
                .map_or(target, |placed| placed.location)
        } else {
            target
        };

        self.graph.set_location(name, location)?;
        debug!("node '{name}' dragged to {location:?}");
        self.publish(Event::NodeMove(PayloadNodeMove {
            name: name.to_string(),
            new_pos: [location.x, location.y],
        }));
        Ok(location)
    }

    /// Topmost node whose disc contains the pointer.
    pub fn node_at(&self, screen_pos: Pos2) -> Option<&Node> {
        let pos = self.network_view.screen_to_canvas_pos(screen_pos);
        let r = self.settings.node.radius;
        self.graph
            .nodes()
            .filter(|n| n.location().distance(pos) <= r)
            .last()
    }

    /// Relaxes the whole network with `iterations` force-directed steps.
    pub fn relax_graph(&mut self, iterations: usize) {
        let start = instant::Instant::now();
        let canvas = self.settings.network_canvas.rect();
        self.force
            .run(&mut self.graph, canvas, self.settings.node.radius, iterations);
        self.last_layout_time_ms = start.elapsed().as_secs_f32() * 1000.;
        info!(
            "relaxed {} node(s) in {iterations} iteration(s), {:.2} ms",
            self.graph.node_count(),
            self.last_layout_time_ms
        );
        self.publish(Event::Layout(PayloadLayout {
            surface: Surface::Network,
            layout: LayoutKind::Relax,
            iterations,
        }));
    }

    /// Rows by node kind followed by a full relaxation pass.
    pub fn auto_layout_network(&mut self) {
        tiered_layout(
            &mut self.graph,
            self.settings.network_canvas.rect(),
            TIER_INSET,
        );
        self.publish(Event::Layout(PayloadLayout {
            surface: Surface::Network,
            layout: LayoutKind::Tiered,
            iterations: 0,
        }));
        self.relax_graph(self.force.state().iterations);
    }

    // ---- frames ----

    /// Creates a frame at a free spot near `hint` (the configured default when `None`).
    ///
    /// # Errors
    /// [`Error::EmptyInput`] or [`Error::DuplicateName`].
    pub fn create_frame(
        &mut self,
        name: &str,
        kind: FrameKind,
        hint: Option<Pos2>,
    ) -> Result<Pos2> {
        let name = non_blank(name, "frame name")?;
        if self.frames.contains(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let location = self.place_new_frame(hint.unwrap_or(self.settings.frame.default_hint));
        self.frames.create_frame(name, kind, location)?;
        self.publish(Event::FrameCreated(PayloadFrameCreated {
            name: name.to_string(),
            kind,
            location: [location.x, location.y],
        }));
        Ok(location)
    }

    /// Position a frame created now near `hint` would get. Does not change the model.
    pub fn place_new_frame(&mut self, hint: Pos2) -> Pos2 {
        let occupied = self.frames.locations();
        let placed =
            PlacementSearch::for_frames(&self.settings).find(hint, &occupied, &mut self.rng);
        if placed.strategy == Strategy::Fallback {
            warn!(
                "no free spot for a frame near {hint:?}, placed randomly at {:?}",
                placed.location
            );
        }
        placed.location
    }

    /// Sets or overwrites a slot.
    ///
    /// # Errors
    /// See [`FrameModel::add_slot`].
    pub fn add_slot(&mut self, frame: &str, slot: &str, value: &str) -> Result<()> {
        self.frames.add_slot(frame, slot, value)?;
        self.publish(Event::SlotSet(PayloadSlotSet {
            frame: frame.trim().to_string(),
            slot: slot.trim().to_string(),
            value: value.trim().to_string(),
        }));
        Ok(())
    }

    /// # Errors
    /// [`Error::UnknownFrame`].
    pub fn remove_frame(&mut self, name: &str) -> Result<Frame> {
        let frame = self.frames.remove_frame(name)?;
        self.publish(Event::FrameRemoved(PayloadFrameRemoved {
            name: frame.name().to_string(),
        }));
        Ok(frame)
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.publish(Event::FramesCleared);
    }

    /// Moves a frame under the pointer, clamped so its box stays on the canvas.
    ///
    /// # Errors
    /// [`Error::UnknownFrame`].
    pub fn move_frame(&mut self, name: &str, screen_pos: Pos2) -> Result<Pos2> {
        let f = &self.settings.frame;
        let margin = Vec2::new(f.width / 2., f.placement_height / 2.);
        let location = clamp_into(
            self.settings.frames_canvas.rect().shrink2(margin),
            self.frames_view.screen_to_canvas_pos(screen_pos),
        );
        self.frames.set_location(name, location)?;
        self.publish(Event::FrameMove(PayloadFrameMove {
            name: name.to_string(),
            new_pos: [location.x, location.y],
        }));
        Ok(location)
    }

    /// Topmost frame whose box contains the pointer.
    pub fn frame_at(&self, screen_pos: Pos2) -> Option<&Frame> {
        let pos = self.frames_view.screen_to_canvas_pos(screen_pos);
        self.frames
            .frames()
            .filter(|f| style::frame_rect(f, &self.settings.frame).contains(pos))
            .last()
    }

    pub fn grid_layout_frames(&mut self) {
        let start = instant::Instant::now();
        grid_layout(&mut self.frames, self.settings.frames_canvas.rect());
        self.last_layout_time_ms = start.elapsed().as_secs_f32() * 1000.;
        info!("arranged {} frame(s) on a grid", self.frames.len());
        self.publish(Event::Layout(PayloadLayout {
            surface: Surface::Frames,
            layout: LayoutKind::Grid,
            iterations: 0,
        }));
    }

    // ---- navigation ----

    /// Zooms a surface by `factor` around the screen point `pivot`. Returns the applied factor.
    pub fn apply_zoom(&mut self, surface: Surface, pivot: Pos2, factor: f32) -> f32 {
        let applied = self.view_mut(surface).zoom_about(pivot, factor);
        if applied != 1. {
            self.publish(Event::Zoom(PayloadZoom {
                surface,
                pivot: [pivot.x, pivot.y],
                factor: applied,
            }));
        }
        applied
    }

    /// One wheel tick: multiplies by the zoom step, or divides by it when zooming out.
    pub fn zoom_step(&mut self, surface: Surface, pivot: Pos2, zoom_in: bool) -> f32 {
        let step = self.settings.navigation.zoom_step;
        let factor = if zoom_in { step } else { 1. / step };
        self.apply_zoom(surface, pivot, factor)
    }

    pub fn apply_pan(&mut self, surface: Surface, delta: Vec2) {
        self.view_mut(surface).pan_by(delta);
        self.publish(Event::Pan(PayloadPan {
            surface,
            diff: [delta.x, delta.y],
        }));
    }

    pub fn reset_view(&mut self, surface: Surface) {
        self.view_mut(surface).reset();
    }

    fn view_mut(&mut self, surface: Surface) -> &mut ViewTransform {
        match surface {
            Surface::Network => &mut self.network_view,
            Surface::Frames => &mut self.frames_view,
        }
    }

    pub(crate) fn models_mut(&mut self) -> (&mut GraphModel, &mut FrameModel) {
        (&mut self.graph, &mut self.frames)
    }

    pub(crate) fn publish(&self, event: Event) {
        if let Some(sink) = &self.sink {
            sink.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn editor() -> Editor {
        Editor::with_seed(Settings::default(), 3)
    }

    #[test]
    fn add_node_places_near_center_by_default() {
        let mut e = editor();
        let loc = e.add_node("bird", NodeKind::Class, None).unwrap();
        assert_eq!(loc, Pos2::new(660., 350.));
        assert_eq!(e.graph().node("bird").unwrap().location(), loc);
    }

    #[test]
    fn rejected_node_is_not_placed() {
        let mut e = editor();
        e.add_node("bird", NodeKind::Class, None).unwrap();
        assert_eq!(
            e.add_node(" bird", NodeKind::Object, None),
            Err(Error::DuplicateName("bird".to_string()))
        );
        assert_eq!(e.add_node("", NodeKind::Object, None), Err(Error::EmptyInput("node name")));
        assert_eq!(e.node_count(), 1);
    }

    #[test]
    fn drag_maps_through_view() {
        let mut e = editor();
        e.add_node("bird", NodeKind::Class, None).unwrap();
        e.apply_zoom(Surface::Network, Pos2::ZERO, 2.);
        let loc = e.drag_node("bird", Pos2::new(400., 400.)).unwrap();
        assert_eq!(loc, Pos2::new(200., 200.));
    }

    #[test]
    fn drag_onto_another_node_is_resolved() {
        let mut e = editor();
        let a = e.add_node("a", NodeKind::Class, Some(Pos2::new(300., 300.))).unwrap();
        e.add_node("b", NodeKind::Class, Some(Pos2::new(800., 300.))).unwrap();
        let loc = e.drag_node("b", a).unwrap();
        assert!(loc.distance(a) >= 132.);
    }

    #[test]
    fn drag_is_clamped_to_canvas() {
        let mut e = editor();
        e.add_node("a", NodeKind::Class, None).unwrap();
        let loc = e.drag_node("a", Pos2::new(-500., 5000.)).unwrap();
        assert_eq!(loc, Pos2::new(60., 640.));
        assert!(matches!(e.drag_node("zz", Pos2::ZERO), Err(Error::UnknownNode(_))));
    }

    #[test]
    fn hit_tests_follow_transform() {
        let mut e = editor();
        let loc = e.add_node("a", NodeKind::Class, None).unwrap();
        assert_eq!(e.node_at(loc).map(Node::name), Some("a"));
        e.apply_pan(Surface::Network, Vec2::new(100., 0.));
        assert!(e.node_at(loc - Vec2::new(70., 0.)).is_none());
        assert_eq!(
            e.node_at(loc + Vec2::new(100., 0.)).map(Node::name),
            Some("a")
        );

        let f = e.create_frame("F", FrameKind::ClassFrame, None).unwrap();
        assert_eq!(e.frame_at(f).map(Frame::name), Some("F"));
        assert!(e.frame_at(f + Vec2::new(150., 0.)).is_none());
    }

    #[test]
    fn zoom_steps_are_reversible() {
        let mut e = editor();
        let pivot = Pos2::new(250., 120.);
        e.zoom_step(Surface::Frames, pivot, true);
        e.zoom_step(Surface::Frames, pivot, false);
        assert!((e.view(Surface::Frames).zoom() - 1.).abs() < 1e-5);
        assert_eq!(e.view(Surface::Network).zoom(), 1.);
    }

    #[test]
    fn events_are_published_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut e = {
            let seen = Rc::clone(&seen);
            editor().with_event_sink(move |ev: Event| seen.borrow_mut().push(ev))
        };
        e.add_node("a", NodeKind::Class, None).unwrap();
        e.add_node("b", NodeKind::Object, None).unwrap();
        e.add_relation("b", "a", RelationKind::IsA).unwrap();
        let _ = e.add_relation("b", "a", RelationKind::IsA);
        e.clear_graph();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert!(matches!(seen[0], Event::NodeAdded(_)));
        assert!(matches!(seen[2], Event::RelationAdded(_)));
        assert_eq!(seen[3], Event::GraphCleared);
    }

    #[test]
    fn auto_layout_keeps_nodes_inside() {
        let mut e = editor();
        for (i, kind) in [NodeKind::Class, NodeKind::Object, NodeKind::Object, NodeKind::Property]
            .into_iter()
            .enumerate()
        {
            e.add_node(&format!("n{i}"), kind, None).unwrap();
        }
        e.add_relation("n1", "n0", RelationKind::IsA).unwrap();
        e.add_relation("n2", "n0", RelationKind::IsA).unwrap();
        e.add_relation("n1", "n3", RelationKind::CanDo).unwrap();
        e.auto_layout_network();
        for n in e.graph().nodes() {
            let l = n.location();
            assert!((60. ..=1140.).contains(&l.x) && (60. ..=640.).contains(&l.y));
        }
    }
}
