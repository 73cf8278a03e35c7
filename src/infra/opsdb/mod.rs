mod client;

pub use client::OpsDbClient;
