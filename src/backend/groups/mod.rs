//! Reading Groups
//!
//! Groups own everything else: books are attached to a group, and progress
//! and comments are scoped to a (group, book) pair. Members join with an
//! invite code; admins manage membership and review spoiler reports.

pub mod types;
pub mod db;
pub mod access;
pub mod invite;
pub mod handlers;

pub use access::{require_admin, require_member};
pub use types::{Group, GroupMember, MemberRole};
