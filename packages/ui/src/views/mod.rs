mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod empty_state;
pub use empty_state::EmptyState;
