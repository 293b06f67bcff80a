/// All workflow-service identifiers are 64-bit integers.
pub type Id = i64;
