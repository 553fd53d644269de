pub mod attachments;
pub mod composer;
pub mod constants;
pub mod draft;
pub mod message;
pub mod notice;
pub mod sizing;
