mod origin;
mod runtime;
mod size;
mod spec;

pub use origin::*;
pub use runtime::*;
pub use size::*;
pub use spec::*;
