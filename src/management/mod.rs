mod auth;
mod state;

pub use auth::TokenManager;
pub use state::Session;
pub use state::SessionStore;
pub use state::TokenState;
