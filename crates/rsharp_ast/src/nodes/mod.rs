//! Node structs and category enums.

mod declarations;
mod expressions;
mod names;
mod statements;

pub use declarations::*;
pub use expressions::*;
pub use names::*;
pub use statements::*;
