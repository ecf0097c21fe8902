pub mod attendance;
pub mod common;
pub mod member;
pub mod schedule;
pub mod team;
