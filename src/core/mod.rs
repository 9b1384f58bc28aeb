pub mod error;
pub mod state;
pub mod upstream;
pub mod urls;
