pub mod events;
pub mod session;
pub mod settings;
pub mod state;
pub mod watch;
