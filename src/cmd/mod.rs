pub mod curate;
pub mod design;
pub mod gaps;
