pub mod field;
pub mod id;
pub mod pop;
pub mod scheduler;
pub mod surface;
pub mod transform;

pub use field::{Editable, Field, FieldEvent, FieldOptions, FieldState, Render, Transformable};
pub use pop::{ChoicePop, Pop, PopRegistry};
pub use transform::{Mode, Pipeline, TransformOptions, TransformSpec};
