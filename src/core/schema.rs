//! Declarative field tables.
//!
//! Every model type owns one static [`Schema`]: an ordered list of
//! [`FieldSpec`]s naming the local field, whether it nests another model, and
//! an optional [`Alias`] describing the wire name, default and conversions.
//! Fields shared by all models live in [`BASE_FIELDS`] and are chained in
//! front of each type's own fields.

use crate::core::factory::{self, Factory, Render};
use serde_json::Value;

/// Value used when an aliased field is absent from the wire mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    /// Absence is a `MissingRequiredField` error.
    Required,
    /// Absence resolves to `Maybe::Unknown`.
    Unknown,
    Text(&'static str),
    Integer(i64),
    EmptyList,
}

impl FieldDefault {
    /// Local value to insert, `None` when nothing should be inserted.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            FieldDefault::Required | FieldDefault::Unknown => None,
            FieldDefault::Text(text) => Some(Value::String((*text).to_string())),
            FieldDefault::Integer(number) => Some(Value::from(*number)),
            FieldDefault::EmptyList => Some(Value::Array(Vec::new())),
        }
    }
}

/// Remote name of a field plus how values cross the boundary.
#[derive(Clone, Copy)]
pub struct Alias {
    name: &'static str,
    default: FieldDefault,
    factory: Factory,
    render: Render,
}

impl std::fmt::Debug for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alias")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl Alias {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::Unknown,
            factory: factory::identity,
            render: factory::render_text,
        }
    }

    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    pub const fn required(self) -> Self {
        self.with_default(FieldDefault::Required)
    }

    pub const fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = factory;
        self
    }

    pub const fn with_render(mut self, render: Render) -> Self {
        self.render = render;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default(&self) -> FieldDefault {
        self.default
    }

    /// Wire value -> local value.
    pub fn parse(&self, raw: &Value) -> std::result::Result<Value, String> {
        (self.factory)(raw)
    }

    /// Local value -> textual wire value.
    pub fn render(&self, value: &Value) -> std::result::Result<Value, String> {
        (self.render)(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Value,
    /// Holds another model; the wire carries its own nested mapping.
    Model(fn() -> &'static Schema),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    alias: Option<Alias>,
}

impl FieldSpec {
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Value,
            alias: None,
        }
    }

    pub const fn aliased(name: &'static str, alias: Alias) -> Self {
        Self {
            name,
            kind: FieldKind::Value,
            alias: Some(alias),
        }
    }

    pub const fn nested(name: &'static str, schema: fn() -> &'static Schema) -> Self {
        Self {
            name,
            kind: FieldKind::Model(schema),
            alias: None,
        }
    }

    pub const fn with_alias(mut self, alias: Alias) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn alias(&self) -> Option<&Alias> {
        self.alias.as_ref()
    }

    /// Key used on the wire: the alias when declared, the field name otherwise.
    pub fn wire_key(&self) -> &'static str {
        self.alias.map_or(self.name, |alias| alias.name())
    }

    pub fn is_required(&self) -> bool {
        self.alias
            .map_or(true, |alias| alias.default() == FieldDefault::Required)
    }
}

/// Fields every model carries.
pub static BASE_FIELDS: [FieldSpec; 1] = [FieldSpec::aliased("uri", Alias::new("URI"))];

#[derive(Debug)]
pub struct Schema {
    model: &'static str,
    inherits_base: bool,
    own: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(model: &'static str, own: &'static [FieldSpec]) -> Self {
        Self {
            model,
            inherits_base: true,
            own,
        }
    }

    /// A schema that does not inherit the base fields.
    pub const fn standalone(model: &'static str, own: &'static [FieldSpec]) -> Self {
        Self {
            model,
            inherits_base: false,
            own,
        }
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Inherited fields first, then the type's own; an own field shadows an
    /// inherited one of the same name.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        let inherited: &[FieldSpec] = if self.inherits_base { &BASE_FIELDS } else { &[] };
        inherited
            .iter()
            .filter(|inherited| !self.own.iter().any(|own| own.name == inherited.name))
            .chain(self.own.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|field| field.name == name)
    }

    /// Field name -> alias, for every field that declared one.
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &Alias)> + '_ {
        self.fields()
            .filter_map(|field| field.alias.as_ref().map(|alias| (field.name, alias)))
    }
}
