pub mod item_repo;
pub mod list_repo;

pub use item_repo::ItemRepo;
pub use list_repo::ListRepo;
