//! Discord integration: connection tracking, intent classification, and
//! the gateway event handler.

pub mod connection;
pub mod handler;
pub mod intent;
pub mod state;

pub use connection::{ConnectionState, ConnectionTracker};
pub use handler::WeatherHandler;
pub use intent::{classify, Intent};
pub use state::BotState;
