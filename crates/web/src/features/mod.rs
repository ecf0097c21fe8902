pub mod attendance;
pub mod members;
pub mod schedules;
pub mod teams;
