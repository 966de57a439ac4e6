mod record;
mod section;
mod tristate;

pub use record::Record;
pub use section::{Section, SectionId};
pub use tristate::TriState;
