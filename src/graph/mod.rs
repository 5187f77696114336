//! The pure graph core: adjacency model, text format, row layout and the
//! stack-based traversals. Nothing in here touches the DOM, so all of it is
//! unit-tested on the host target.

pub mod layout;
pub mod model;
pub mod text;
pub mod traverse;

pub use layout::{Layout, Pos};
pub use model::{Graph, Node};
pub use traverse::{EdgeVisit, TraversalRun, TraverseError, Visit};
