pub mod post_repo;
pub mod revision_repo;
pub mod user_repo;

pub use post_repo::PostRepo;
pub use revision_repo::RevisionRepo;
pub use user_repo::UserRepo;
