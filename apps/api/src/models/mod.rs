pub mod conversation;
pub mod criteria;
pub mod job;
