pub mod location;
pub mod log_entry;
pub mod tunnel_event;
