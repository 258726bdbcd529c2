pub mod analysis;
pub mod app;
pub mod capabilities;
pub mod clock;
pub mod controller;
pub mod remote;
pub mod session_log;
pub mod sessions;
pub mod tunnel_state;
