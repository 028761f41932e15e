pub mod links;

pub use links::{LinkStore, NewShortUrl};
