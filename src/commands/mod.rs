pub mod evaluate;
pub mod forecast;
pub mod input;
pub mod summary;

// Re-export command functions for convenience
pub use evaluate::evaluate;
pub use forecast::forecast;
pub use summary::summary;
