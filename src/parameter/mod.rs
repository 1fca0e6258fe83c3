pub mod choices;
pub mod definition;
pub mod descriptor;
pub mod set;

pub use choices::{format_optional, DEFAULT_MAX_VISIBLE_ITEM_COUNT};
pub use definition::*;
pub use descriptor::*;
pub use set::ParameterSet;
