//! Domain models for the inventory application.

pub mod room;
pub mod session;
pub mod storage_box;
pub mod user;

pub use room::Room;
pub use session::{CurrentUser, session_keys};
pub use storage_box::{BoxItem, BoxUpdate, BoxWithItems, NewBoxItem, StorageBox};
pub use user::{Profile, ProfileUpdate, User};
