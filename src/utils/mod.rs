pub mod parsing;
pub mod password;

// Re-export commonly used items
pub use password::PasswordHash;
