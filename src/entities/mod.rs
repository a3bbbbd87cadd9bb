//! Entities module - Domain entities
//!
//! Each entity maps to one table (or, for the `*Summary` / member types, to a
//! fixed query projection) and is decoded with `sqlx::FromRow`.

pub mod attendance;
pub mod enums;
pub mod event;
pub mod group;
pub mod image;
pub mod membership;
pub mod user;
pub mod venue;

pub use attendance::{Attendance, EventAttendee};
pub use enums::{AttendanceStatus, MeetingType, MembershipStatus};
pub use event::{Event, EventSummary};
pub use group::{Group, GroupSummary};
pub use image::{EventImage, GroupImage};
pub use membership::{GroupMember, Membership};
pub use user::User;
pub use venue::Venue;
