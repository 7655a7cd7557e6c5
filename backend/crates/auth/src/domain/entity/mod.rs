pub mod admin_credential;

pub use admin_credential::{AdminCredential, NewAdminCredential};
