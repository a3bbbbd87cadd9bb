//! Repositories module - one repository per table
//!
//! Every repository owns a clone of the `SqlitePool` and implements the CRUD
//! traits from [`traits`] that make sense for its table. Lookups that are not
//! by primary key (by email, by group, filtered listings) are inherent methods.
//!
//! Queries use the runtime-checked `sqlx::query_as::<_, T>` form together with
//! `#[derive(sqlx::FromRow)]` entities, so building the crate does not need a
//! live database.

pub mod attendance;
pub mod event;
pub mod group;
pub mod image;
pub mod membership;
pub mod traits;
pub mod user;
pub mod venue;

pub use traits::{Create, Delete, Read, Update};

pub use attendance::AttendanceRepository;
pub use event::EventRepository;
pub use group::GroupRepository;
pub use image::{EventImageRepository, GroupImageRepository};
pub use membership::MembershipRepository;
pub use user::UserRepository;
pub use venue::VenueRepository;
