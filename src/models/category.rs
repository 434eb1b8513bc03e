/// The categories offered by the entry form. Stored records may carry any
/// category string; these are the ones the UI knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Health,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Free-text categories return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "entertainment" => Some(Self::Entertainment),
            "shopping" => Some(Self::Shopping),
            "bills" => Some(Self::Bills),
            "health" => Some(Self::Health),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Shopping,
            Self::Bills,
            Self::Health,
            Self::Other,
        ]
    }

    /// Canonical spelling for a known category, otherwise the trimmed input.
    pub fn normalize(s: &str) -> String {
        match Self::parse(s) {
            Some(c) => c.as_str().to_string(),
            None => s.trim().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
