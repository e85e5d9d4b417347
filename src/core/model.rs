use crate::core::mapping::{self, WireMapping};
use crate::core::schema::Schema;
use crate::core::validator::{Validator, ValidatorRegistry};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// An immutable record exchanged with the remote service.
///
/// Implementors serialize under their local field names; the [`Schema`]
/// describes how those names and values map onto the wire.
pub trait Model: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync + 'static {
    fn schema() -> &'static Schema;

    /// The type's registry, built with [`ValidatorRegistry::discover`] on
    /// first use.
    fn registry() -> &'static ValidatorRegistry<Self>;

    /// Validators registered automatically for every instance of the type.
    fn declared_validators() -> Vec<Validator<Self>> {
        Vec::new()
    }

    fn from_mapping(wire: WireMapping) -> Result<Self> {
        mapping::from_mapping(wire)
    }

    fn into_mapping(&self) -> Result<WireMapping> {
        mapping::into_mapping(self)
    }

    fn is_valid(&self) -> bool {
        Self::registry().validate(self)
    }

    fn failing_validators(&self) -> Vec<String> {
        Self::registry().failing(self)
    }

    fn insert_validator(validator: Validator<Self>) -> Result<()> {
        Self::registry().insert(validator)
    }

    fn remove_validator(validator: &Validator<Self>) -> Result<Validator<Self>> {
        Self::registry().remove(validator)
    }
}
