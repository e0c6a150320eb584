// Resume lifecycle: upload pipeline, persistence and the HTTP surface over them.

pub mod handlers;
pub mod pipeline;
pub mod store;
