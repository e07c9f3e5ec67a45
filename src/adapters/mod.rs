// Adapters layer: concrete implementations of the domain ports (http, storage).

pub mod http;
pub mod storage;
