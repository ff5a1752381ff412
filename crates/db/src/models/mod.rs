pub mod edit_history;
pub mod post;
pub mod user;
