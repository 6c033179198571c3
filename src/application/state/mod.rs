//! Building blocks shared by the view models.

pub mod messages;
mod one_shot;
mod store;
mod subscription;
mod ui_state;

pub use one_shot::OneShotQueue;
pub use store::StateStore;
pub use subscription::{SubscriptionGuard, SubscriptionSlot};
pub use ui_state::UiState;
