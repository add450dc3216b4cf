//! These models represent the objects passed between callers, providers and tools
//!
//! A conversation is a [`Transcript`] of role-tagged [`Message`]s. Providers read a
//! transcript and hand back a fresh assistant message; the caller decides whether to
//! append it. Loaders produce [`Document`]s whose text can be folded into a transcript.
pub mod document;
pub mod message;
pub mod role;
pub mod transcript;

pub use document::{Document, SOURCE_METADATA_KEY};
pub use message::Message;
pub use role::Role;
pub use transcript::Transcript;
