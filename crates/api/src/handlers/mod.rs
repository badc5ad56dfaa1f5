pub mod completion;
pub mod items;
pub mod lists;
