use egui::Pos2;
use indexmap::IndexMap;
use log::debug;

use crate::{error::non_blank, Error, Frame, FrameKind, Result};

/// Insertion-ordered collection of uniquely named frames.
///
/// Frames are independent of the semantic network: a frame named after a node has no link to it.
#[derive(Debug, Clone, Default)]
pub struct FrameModel {
    frames: IndexMap<String, Frame>,
}

impl FrameModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// [`Error::EmptyInput`] for a blank name, [`Error::DuplicateName`] when the name is taken.
    pub fn create_frame(&mut self, name: &str, kind: FrameKind, location: Pos2) -> Result<()> {
        let name = non_blank(name, "frame name")?;
        if self.frames.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        self.frames
            .insert(name.to_string(), Frame::new(name.to_string(), kind, location));
        debug!("frame '{name}' ({kind}) created at {location:?}");
        Ok(())
    }

    /// Sets a slot value, overwriting the slot if it already exists.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] when the frame name, slot name or value is blank and
    /// [`Error::UnknownFrame`] when the frame does not exist.
    pub fn add_slot(&mut self, frame: &str, slot: &str, value: &str) -> Result<()> {
        let frame = non_blank(frame, "frame name")?;
        let slot = non_blank(slot, "slot name")?;
        let value = non_blank(value, "slot value")?;

        let target = self
            .frames
            .get_mut(frame)
            .ok_or_else(|| Error::UnknownFrame(frame.to_string()))?;
        match target.upsert_slot(slot.to_string(), value.to_string()) {
            Some(prev) => debug!("slot '{frame}.{slot}' overwritten: '{prev}' -> '{value}'"),
            None => debug!("slot '{frame}.{slot}' = '{value}' added"),
        }
        Ok(())
    }

    /// # Errors
    /// [`Error::UnknownFrame`] when the frame does not exist.
    pub fn remove_frame(&mut self, name: &str) -> Result<Frame> {
        let name = name.trim();
        let frame = self
            .frames
            .shift_remove(name)
            .ok_or_else(|| Error::UnknownFrame(name.to_string()))?;
        debug!("frame '{name}' removed");
        Ok(frame)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        debug!("frames cleared");
    }

    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    /// Frames in insertion order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn locations(&self) -> Vec<Pos2> {
        self.frames.values().map(Frame::location).collect()
    }

    /// # Errors
    /// [`Error::UnknownFrame`] when the frame does not exist.
    pub fn set_location(&mut self, name: &str, location: Pos2) -> Result<()> {
        let frame = self
            .frames
            .get_mut(name)
            .ok_or_else(|| Error::UnknownFrame(name.to_string()))?;
        frame.set_location(location);
        Ok(())
    }

    pub(crate) fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.frames.values_mut()
    }
}
