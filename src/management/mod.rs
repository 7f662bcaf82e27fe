mod auth;
mod drafts;

pub use auth::TokenStore;
pub use drafts::DraftManager;
