use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

/// The currently logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub uuid: AccountId,
    pub display_name: String,
}

impl Account {
    /// First letter of every space separated part of the display name, as
    /// shown in the avatar.
    pub fn initials(&self) -> String {
        initials(&self.display_name)
    }
}

pub fn initials(display_name: &str) -> String {
    display_name
        .split(' ')
        .filter_map(|part| part.chars().next())
        .collect()
}
