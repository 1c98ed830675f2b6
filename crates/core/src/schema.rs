use std::sync::Arc;

use thiserror::Error;

/// How a component is advanced by an integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A coordinate advanced kinematically from its paired velocity.
    ///
    /// `velocity` is the schema index of that velocity component.
    Position { velocity: usize },

    /// A velocity-like component advanced from a rate supplied by the law.
    Velocity,

    /// A first-order component (charge, temperature, population, ...)
    /// advanced from a rate supplied by the law.
    Free,
}

impl Role {
    /// Returns true if the law must supply a rate for this component.
    #[must_use]
    pub fn takes_rate(self) -> bool {
        !matches!(self, Role::Position { .. })
    }
}

/// A named component of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    role: Role,
}

impl Component {
    /// Returns the component's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the component is advanced.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Errors that can occur when building a [`Schema`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema must have at least one component")]
    Empty,

    #[error("component name must not be empty")]
    EmptyName,

    #[error("duplicate component name: {0}")]
    Duplicate(String),
}

/// The ordered, named components of a simulated system.
///
/// A schema fixes the dimension of every [`StateVector`] built on it and
/// decides which components the law supplies rates for. Positions are paired
/// with a velocity; everything else is a *rate component*, and the law's
/// [`Rates`] list one value per rate component in schema order.
///
/// [`StateVector`]: crate::StateVector
/// [`Rates`]: crate::Rates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    components: Vec<Component>,
    rate_slots: Vec<Option<usize>>,
    rate_count: usize,
}

impl Schema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false; a schema has at least one component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the components in schema order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns the schema index of the named component.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    /// Returns true if the schema has a component with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Iterates over component names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(Component::name)
    }

    /// Returns the number of components the law must supply rates for.
    #[must_use]
    pub fn rate_count(&self) -> usize {
        self.rate_count
    }

    /// Returns the position of component `index` within the rates, if any.
    #[must_use]
    pub fn rate_slot(&self, index: usize) -> Option<usize> {
        self.rate_slots.get(index).copied().flatten()
    }

    /// Iterates over the names of rate components, in rate order.
    pub fn rate_names(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter(|c| c.role.takes_rate())
            .map(Component::name)
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default, Clone)]
pub struct SchemaBuilder {
    components: Vec<Component>,
}

impl SchemaBuilder {
    /// Appends a position and its paired velocity.
    #[must_use]
    pub fn pair(mut self, position: impl Into<String>, velocity: impl Into<String>) -> Self {
        let velocity_index = self.components.len() + 1;
        self.components.push(Component {
            name: position.into(),
            role: Role::Position {
                velocity: velocity_index,
            },
        });
        self.components.push(Component {
            name: velocity.into(),
            role: Role::Velocity,
        });
        self
    }

    /// Appends a first-order component.
    #[must_use]
    pub fn free(mut self, name: impl Into<String>) -> Self {
        self.components.push(Component {
            name: name.into(),
            role: Role::Free,
        });
        self
    }

    /// Validates the components and builds a shareable schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if there are no components, a name is empty,
    /// or a name appears twice.
    pub fn build(self) -> Result<Arc<Schema>, SchemaError> {
        if self.components.is_empty() {
            return Err(SchemaError::Empty);
        }

        for (i, component) in self.components.iter().enumerate() {
            if component.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if self.components[..i]
                .iter()
                .any(|other| other.name == component.name)
            {
                return Err(SchemaError::Duplicate(component.name.clone()));
            }
        }

        let mut rate_count = 0;
        let rate_slots = self
            .components
            .iter()
            .map(|c| {
                c.role.takes_rate().then(|| {
                    rate_count += 1;
                    rate_count - 1
                })
            })
            .collect();

        Ok(Arc::new(Schema {
            components: self.components,
            rate_slots,
            rate_count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_link_position_to_velocity() {
        let schema = Schema::builder()
            .pair("position_x", "velocity_x")
            .pair("position_y", "velocity_y")
            .build()
            .unwrap();

        assert_eq!(schema.len(), 4);
        assert_eq!(
            schema.components()[2].role(),
            Role::Position { velocity: 3 }
        );
        assert_eq!(schema.index_of("velocity_y"), Some(3));
        assert_eq!(schema.rate_count(), 2);
        assert_eq!(
            schema.rate_names().collect::<Vec<_>>(),
            vec!["velocity_x", "velocity_y"]
        );
    }

    #[test]
    fn rate_slots_skip_positions() {
        let schema = Schema::builder()
            .free("temperature")
            .pair("charge", "current")
            .build()
            .unwrap();

        assert_eq!(schema.rate_slot(0), Some(0));
        assert_eq!(schema.rate_slot(1), None);
        assert_eq!(schema.rate_slot(2), Some(1));
        assert_eq!(schema.rate_slot(3), None);
    }

    #[test]
    fn rejects_empty_and_duplicate_schemas() {
        assert_eq!(Schema::builder().build(), Err(SchemaError::Empty));
        assert_eq!(
            Schema::builder().free("").build(),
            Err(SchemaError::EmptyName)
        );
        assert_eq!(
            Schema::builder().pair("x", "v").free("x").build(),
            Err(SchemaError::Duplicate("x".into()))
        );
    }
}
