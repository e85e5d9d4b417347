// Domain layer: the archive's entities and their value types.

pub mod model;
pub mod quality;
pub mod unknown;
