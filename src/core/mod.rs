pub mod factory;
pub mod mapping;
pub mod model;
pub mod predicates;
pub mod schema;
pub mod validator;

pub use crate::utils::error::Result;
pub use mapping::{from_mapping, into_mapping, WireMapping};
pub use model::Model;
pub use schema::{Alias, FieldDefault, FieldKind, FieldSpec, Schema};
pub use validator::{Validator, ValidatorArgs, ValidatorRegistry};
