use super::entities::Item;
use super::errors::FetchError;

/// View-facing state of the search screen.
///
/// Transitions: `Initial -> Loading -> {Empty | Loaded | Failed}`. Starting a
/// new search from any state moves back to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Initial,
    Loading,
    Empty,
    Loaded(Vec<Item>),
    Failed(FetchError),
}

impl SearchState {
    /// Builds the terminal state for a finished search.
    #[must_use]
    pub fn from_result(result: Result<Vec<Item>, FetchError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Loaded(items),
            Err(e) => Self::Failed(e),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Loaded(items) => items,
            _ => &[],
        }
    }

    /// Status line shown above the result list, if any.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        match self {
            Self::Initial => Some("Input your request".to_string()),
            Self::Loading => Some("Loading...".to_string()),
            Self::Empty => Some("No apps found".to_string()),
            Self::Loaded(_) => None,
            Self::Failed(e) => Some(format!("Error: {e}")),
        }
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Loading => write!(f, "loading"),
            Self::Empty => write!(f, "empty"),
            Self::Loaded(items) => write!(f, "loaded({})", items.len()),
            Self::Failed(_) => write!(f, "failed"),
        }
    }
}
