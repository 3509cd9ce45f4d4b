mod frame;
mod node;
mod relation;

pub use self::frame::{Frame, FrameKind};
pub use self::node::{Node, NodeKind};
pub use self::relation::{Relation, RelationKind, RelationRef};
