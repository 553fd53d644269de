//! Plume is the headless input-composition core of a chat client.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns composer state: the draft text, the attachment queue,
//!   input sizing, submission gating, and stream cancellation.
//! - [`api`] defines the upload endpoint payloads and the upload client that
//!   turns a picked file into a normalized attachment descriptor.
//! - [`auth`] implements the route authorization gate as a pure decision
//!   function behind a minimal session-capability trait.
//! - [`utils`] holds URL construction and draft text sanitization helpers.
//!
//! A UI layer attaches through [`core::composer::ComposerSurface`] and
//! [`core::composer::SendHandler`], and drains user-visible notices from the
//! channel created by [`core::notice::notice_channel`].

pub mod api;
pub mod auth;
pub mod core;
pub mod utils;
