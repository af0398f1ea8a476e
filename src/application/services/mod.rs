pub mod channel_resolver;
pub mod reconciler;
pub mod remote_state;
