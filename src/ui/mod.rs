pub mod messages;
pub mod record_view;
