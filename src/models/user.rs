use serde::{Deserialize, Serialize};

/// A user identity from the user_info table.
///
/// Only the id is retained; any other metadata columns in the source table
/// are opaque to the engine and dropped on load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: u32,
}
