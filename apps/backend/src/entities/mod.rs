pub mod games;
pub mod moves;
pub mod team_members;
pub mod teams;
pub mod users;
