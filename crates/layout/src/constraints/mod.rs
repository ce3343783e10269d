mod defaults;
mod edge;

pub use defaults::ComponentConstraints;
pub use edge::{LayoutMeta, LayoutObject, LayoutState, MetaType};
