//! Per-model validator registry.
//!
//! A [`Validator`] is a named predicate over a model plus the arguments bound
//! to it at construction time, so one generic predicate can be specialised
//! per field or threshold. Two validators are the same validator when both
//! name and bound arguments match, whatever closure they carry, so a name
//! must stay unique per model for each distinct predicate.
//!
//! Each model type owns one [`ValidatorRegistry`]. The declared validators are
//! collected once, when the registry is first touched; after that the registry
//! may still be changed through [`ValidatorRegistry::insert`] and
//! [`ValidatorRegistry::remove`], guarded by a read/write lock.

use crate::core::model::Model;
use crate::utils::error::{ModelError, Result};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

pub type ValidatorArgs = Map<String, Value>;

type Predicate<M> = Arc<dyn Fn(&M, &ValidatorArgs) -> bool + Send + Sync>;

/// Identity is `(name, bound arguments)`: registering a different predicate
/// under a name already in use is rejected as a duplicate.
pub struct Validator<M> {
    name: Cow<'static, str>,
    args: ValidatorArgs,
    predicate: Predicate<M>,
}

impl<M> Validator<M> {
    /// A predicate that reads its bound arguments.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&M, &ValidatorArgs) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            args: ValidatorArgs::new(),
            predicate: Arc::new(predicate),
        }
    }

    /// A predicate that takes no arguments.
    pub fn simple<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |model: &M, _: &ValidatorArgs| predicate(model))
    }

    /// Binds an argument, yielding a distinct validator.
    pub fn bind(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &ValidatorArgs {
        &self.args
    }

    /// `name` or `name(key=value, ...)` when arguments are bound.
    pub fn label(&self) -> String {
        if self.args.is_empty() {
            return self.name.to_string();
        }
        let args = self
            .args
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, args)
    }

    pub fn check(&self, model: &M) -> bool {
        (self.predicate)(model, &self.args)
    }
}

impl<M> Clone for Validator<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            args: self.args.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<M> PartialEq for Validator<M> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.args == other.args
    }
}

impl<M> fmt::Debug for Validator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

pub struct ValidatorRegistry<M> {
    model: &'static str,
    validators: RwLock<Vec<Validator<M>>>,
}

impl<M: Model> ValidatorRegistry<M> {
    /// Registry seeded with the model's declared validators. A validator
    /// declared twice is reported and skipped.
    pub fn discover() -> Self {
        let registry = Self::new(M::schema().model());
        for validator in M::declared_validators() {
            if let Err(e) = registry.insert(validator) {
                tracing::warn!("⚠️ Skipping declared validator: {}", e);
            }
        }
        tracing::debug!(
            "🔧 {}: {} validator(s) registered",
            registry.model,
            registry.len()
        );
        registry
    }
}

impl<M> ValidatorRegistry<M> {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            validators: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, validator: Validator<M>) -> Result<()> {
        let mut validators = self
            .validators
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if validators.contains(&validator) {
            return Err(ModelError::ValidatorAlreadyRegistered {
                model: self.model.to_string(),
                validator: validator.label(),
            });
        }
        validators.push(validator);
        Ok(())
    }

    pub fn remove(&self, validator: &Validator<M>) -> Result<Validator<M>> {
        let mut validators = self
            .validators
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match validators.iter().position(|registered| registered == validator) {
            Some(index) => Ok(validators.remove(index)),
            None => Err(ModelError::NotAValidator {
                model: self.model.to_string(),
                validator: validator.label(),
            }),
        }
    }

    pub fn contains(&self, validator: &Validator<M>) -> bool {
        self.snapshot().contains(validator)
    }

    pub fn len(&self) -> usize {
        self.validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // 先複製再執行，驗證函式內即使再操作登錄表也不會死鎖
    fn snapshot(&self) -> Vec<Validator<M>> {
        self.validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True when every registered validator accepts the model.
    pub fn validate(&self, model: &M) -> bool {
        self.snapshot().iter().all(|validator| {
            let passed = validator.check(model);
            tracing::trace!("{}: {} -> {}", self.model, validator.label(), passed);
            passed
        })
    }

    /// Labels of the validators rejecting the model.
    pub fn failing(&self, model: &M) -> Vec<String> {
        self.snapshot()
            .iter()
            .filter(|validator| !validator.check(model))
            .map(Validator::label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{FieldSpec, Schema};
    use serde::{Deserialize, Serialize};
    use std::sync::OnceLock;

    #[derive(Debug)]
    struct Reading(i64);

    fn above(reading: &Reading, args: &ValidatorArgs) -> bool {
        args.get("min")
            .and_then(Value::as_i64)
            .map_or(false, |min| reading.0 >= min)
    }

    #[test]
    fn test_bound_arguments_make_distinct_validators() {
        let low = Validator::new("above", above).bind("min", 0);
        let high = Validator::new("above", above).bind("min", 10);
        assert_ne!(low, high);
        assert_eq!(low, Validator::new("above", above).bind("min", 0));
        assert!(low.check(&Reading(5)));
        assert!(!high.check(&Reading(5)));
        assert_eq!(high.label(), "above(min=10)");
    }

    #[test]
    fn test_insert_twice_fails() {
        let registry = ValidatorRegistry::new("Reading");
        let positive = Validator::simple("positive", |reading: &Reading| reading.0 > 0);
        registry.insert(positive.clone()).unwrap();
        assert!(matches!(
            registry.insert(positive),
            Err(ModelError::ValidatorAlreadyRegistered { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_name_different_predicate_is_a_duplicate() {
        let registry = ValidatorRegistry::new("Reading");
        registry
            .insert(Validator::simple("positive", |reading: &Reading| reading.0 > 0))
            .unwrap();
        assert!(matches!(
            registry.insert(Validator::simple("positive", |reading: &Reading| reading.0 >= 0)),
            Err(ModelError::ValidatorAlreadyRegistered { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_twice_fails() {
        let registry = ValidatorRegistry::new("Reading");
        let positive = Validator::simple("positive", |reading: &Reading| reading.0 > 0);
        registry.insert(positive.clone()).unwrap();
        assert!(registry.remove(&positive).is_ok());
        assert!(matches!(
            registry.remove(&positive),
            Err(ModelError::NotAValidator { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_validate_is_conjunction() {
        let registry = ValidatorRegistry::new("Reading");
        assert!(registry.validate(&Reading(-1)));

        registry
            .insert(Validator::new("above", above).bind("min", 0))
            .unwrap();
        registry
            .insert(Validator::simple("even", |reading: &Reading| reading.0 % 2 == 0))
            .unwrap();

        assert!(registry.validate(&Reading(4)));
        assert!(!registry.validate(&Reading(3)));
        assert!(!registry.validate(&Reading(-2)));
        assert_eq!(registry.failing(&Reading(-3)), vec!["above(min=0)", "even"]);
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Gauge {
        level: i64,
    }

    static GAUGE_FIELDS: [FieldSpec; 1] = [FieldSpec::plain("level")];
    static GAUGE_SCHEMA: Schema = Schema::standalone("Gauge", &GAUGE_FIELDS);

    fn level_positive() -> Validator<Gauge> {
        Validator::simple("level_positive", |gauge: &Gauge| gauge.level > 0)
    }

    impl Model for Gauge {
        fn schema() -> &'static Schema {
            &GAUGE_SCHEMA
        }

        fn registry() -> &'static ValidatorRegistry<Self> {
            static REGISTRY: OnceLock<ValidatorRegistry<Gauge>> = OnceLock::new();
            REGISTRY.get_or_init(ValidatorRegistry::discover)
        }

        fn declared_validators() -> Vec<Validator<Self>> {
            vec![level_positive(), level_positive()]
        }
    }

    #[test]
    fn test_discover_skips_duplicate_declarations() {
        let registry = ValidatorRegistry::<Gauge>::discover();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&level_positive()));
        assert!(matches!(
            registry.insert(level_positive()),
            Err(ModelError::ValidatorAlreadyRegistered { ref model, .. }) if model == "Gauge"
        ));
        assert!(registry.validate(&Gauge { level: 3 }));
        assert!(!registry.validate(&Gauge { level: 0 }));
    }
}
