//! Loading / success / error screen state.

/// What a screen is currently showing. Exactly one variant is active and
/// only the owning view model moves between them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState<T> {
    #[default]
    Loading,
    Success(T),
    Error(String),
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    /// The payload when in `Success`.
    pub fn data(&self) -> Option<&T> {
        match self {
            UiState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            UiState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}
