pub mod constraint;
pub mod executor;
pub mod text;
pub mod view;

pub use constraint::{
    ConstraintHandle, ConstraintRelation, ConstraintSink, LayoutPriority, NativeConstraint,
    RecordingConstraintSink, ViewRef,
};
pub use executor::{Executor, SyncExecutor};
pub use text::{TextAttributes, TextDescriptor, TextHostKind, TextMeasurer, TextMetrics};
pub use view::{InMemoryViewHost, ViewHost, ViewHostError};
