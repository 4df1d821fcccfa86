//! Body registry: static gravitating bodies that stay fixed for a whole run.

use std::collections::HashSet;

use slingshot_core::vector::{self, Vector2};
use slingshot_orbits::{escape_speed, gravitational_parameter};

use crate::{SetupError, positive_finite};

/// A gravitating body fixed in place for the duration of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Identifier, unique within a registry.
    pub name: String,
    pub mass_kg: f64,
    pub position_m: Vector2,
    /// Radius of the sphere of influence that triggers the assist.
    pub influence_radius_m: f64,
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        mass_kg: f64,
        position_m: Vector2,
        influence_radius_m: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mass_kg,
            position_m,
            influence_radius_m,
        }
    }

    /// `G * M` for this body.
    #[inline]
    pub fn mu(&self, g: f64) -> f64 {
        gravitational_parameter(g, self.mass_kg)
    }

    /// Distance from `position` to the body centre.
    #[inline]
    pub fn distance_from(&self, position: &Vector2) -> f64 {
        vector::distance(&self.position_m, position)
    }

    /// Escape speed evaluated at the edge of the sphere of influence.
    pub fn escape_speed_at_influence_radius(&self, g: f64) -> f64 {
        escape_speed(self.mu(g), self.influence_radius_m)
    }

    fn validate(&self) -> Result<(), SetupError> {
        if !positive_finite(self.mass_kg) {
            return Err(SetupError::NonPositiveBodyMass {
                body: self.name.clone(),
                mass_kg: self.mass_kg,
            });
        }
        if !positive_finite(self.influence_radius_m) {
            return Err(SetupError::NonPositiveInfluenceRadius {
                body: self.name.clone(),
                radius_m: self.influence_radius_m,
            });
        }
        if !vector::is_finite(&self.position_m) {
            return Err(SetupError::NonFiniteBodyPosition(self.name.clone()));
        }
        Ok(())
    }
}

/// Validated, immutable set of bodies in declaration order.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    /// Validate every body and reject names that differ only in case.
    pub fn new(bodies: Vec<Body>) -> Result<Self, SetupError> {
        let mut seen = HashSet::with_capacity(bodies.len());
        for body in &bodies {
            body.validate()?;
            if !seen.insert(body.name.to_uppercase()) {
                return Err(SetupError::DuplicateBody(body.name.clone()));
            }
        }
        Ok(Self { bodies })
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Look a body up by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Body> {
        let upper = name.to_uppercase();
        self.bodies.iter().find(|b| b.name.to_uppercase() == upper)
    }
}

impl<'a> IntoIterator for &'a BodyRegistry {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
