//! Embedding provider implementations.

pub mod openai;
pub mod pinecone;
pub mod placeholder;
pub mod trigram;
