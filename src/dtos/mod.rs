//! DTOs module - Data Transfer Objects
//!
//! Request bodies validated with `validator` and the JSON shapes returned to
//! clients. Entities never leave the crate directly.

pub mod attendance;
pub mod common;
pub mod datetime;
pub mod event;
pub mod group;
pub mod image;
pub mod membership;
pub mod query;
pub mod user;
pub mod venue;

pub use attendance::{
    AttendanceDTO, AttendanceRequestDTO, AttendeeDTO, AttendeesDTO, ChangeAttendanceDTO,
    CreateAttendanceDTO,
};
pub use common::MessageDTO;
pub use event::{
    CreateEventDTO, EventBodyDTO, EventDTO, EventDataDTO, EventDetailsDTO, EventListDTO,
    EventSummaryDTO,
};
pub use group::{
    CreateGroupDTO, GroupBodyDTO, GroupDTO, GroupDataDTO, GroupDetailsDTO, GroupListDTO,
    GroupSummaryDTO, OrganizerDTO,
};
pub use image::{CreateEventImageDTO, CreateGroupImageDTO, ImageBodyDTO, ImageDTO};
pub use membership::{
    ChangeMembershipDTO, CreateMembershipDTO, MemberDTO, MembersDTO, MembershipDTO, MembershipRequestDTO,
};
pub use query::{EventFilter, EventsQuery};
pub use user::{CreateUserDTO, LoginDTO, SafeUserDTO, SessionDTO, SignupDTO};
pub use venue::{CreateVenueDTO, VenueBodyDTO, VenueDTO, VenueDataDTO, VenueListDTO};
