pub mod groups;
pub mod identity;
pub mod records;
pub mod rooms;
pub mod students;
pub mod subjects;
