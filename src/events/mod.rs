mod event;
mod sink;

pub use event::{
    Event, LayoutKind, PayloadFrameCreated, PayloadFrameMove, PayloadFrameRemoved, PayloadLayout,
    PayloadNodeAdded, PayloadNodeMove, PayloadNodeRemoved, PayloadPan, PayloadRelationAdded,
    PayloadSlotSet, PayloadZoom,
};

pub use sink::EventSink;
