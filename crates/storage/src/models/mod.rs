mod attendance;
mod member;
mod schedule;
mod skill_level;
mod team;

pub use attendance::{Attendance, AttendanceStatus, ParseAttendanceStatusError};
pub use member::{Member, MemberRole, ParseMemberRoleError};
pub use schedule::{DEFAULT_MAX_PARTICIPANTS, Schedule};
pub use skill_level::{FALLBACK_SCORE, ParseSkillLevelError, SkillLevel};
pub use team::Team;
