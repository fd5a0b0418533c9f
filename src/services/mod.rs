// Service exports
pub mod backend;
pub mod directory;
pub mod friends;

pub use backend::{BackendClient, BackendError};
pub use directory::{DirectoryCache, DirectoryError, Snapshot, find_profile};
pub use friends::{FriendsService, FriendsError};
