/// Sort direction applied to `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// The table-backed listings selectable through the `action` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Users,
    Media,
    Documents,
    Messages,
}

impl Listing {
    /// Action used when the request carries none
    pub const DEFAULT_ACTION: &'static str = "users";

    /// The `action` value selecting this listing
    pub fn as_action(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Media => "media",
            Self::Documents => "documents",
            Self::Messages => "messages",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Media => "media_items",
            Self::Documents => "documents",
            Self::Messages => "support_messages",
        }
    }

    /// Support messages read as a conversation, everything else newest first
    pub fn order(&self) -> SortOrder {
        match self {
            Self::Messages => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    /// The single statement executed for this listing
    pub fn query(&self) -> &'static str {
        match self {
            Self::Users => "SELECT * FROM users ORDER BY created_at DESC",
            Self::Media => "SELECT * FROM media_items ORDER BY created_at DESC",
            Self::Documents => "SELECT * FROM documents ORDER BY created_at DESC",
            Self::Messages => "SELECT * FROM support_messages ORDER BY created_at ASC",
        }
    }

    pub fn all() -> &'static [Listing] {
        &[Self::Users, Self::Media, Self::Documents, Self::Messages]
    }

    /// Parse an `action` value; matching is exact and case-sensitive
    pub fn from_action(action: &str) -> Option<Listing> {
        match action {
            "users" => Some(Self::Users),
            "media" => Some(Self::Media),
            "documents" => Some(Self::Documents),
            "messages" => Some(Self::Messages),
            _ => None,
        }
    }
}
