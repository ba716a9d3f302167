use crate::error::SolverError;
use std::collections::BTreeMap;
use std::path::Path;

/// Muzzle velocities by ship name, owned by the calling layer.
///
/// Lookups ignore case; listing keeps the names as they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipCatalog {
    ships: BTreeMap<String, f64>,
}

impl Default for ShipCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert("Midway", 762.0);
        catalog.insert("Alabama", 701.0);
        catalog.insert("Atlanta", 790.0);
        catalog.insert("Dolphin", 18.0); // torpedo, horizontal launch only
        catalog.insert("Farragut", 790.0);
        catalog
    }
}

impl ShipCatalog {
    pub fn empty() -> Self {
        Self {
            ships: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, muzzle_velocity: f64) {
        self.ships.insert(name.into(), muzzle_velocity);
    }

    /// Parse a JSON object of `{ "Name": muzzle_velocity_mps, ... }`
    pub fn from_json_str(json: &str) -> Result<Self, SolverError> {
        let ships: BTreeMap<String, f64> = serde_json::from_str(json)?;
        if let Some((_, &v0)) = ships.iter().find(|(_, v0)| !(v0.is_finite() && **v0 > 0.0)) {
            return Err(SolverError::InvalidMuzzleVelocity(v0));
        }
        Ok(Self { ships })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SolverError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn muzzle_velocity(&self, name: &str) -> Result<f64, SolverError> {
        self.ships
            .iter()
            .find(|(ship, _)| ship.eq_ignore_ascii_case(name))
            .map(|(_, &v0)| v0)
            .ok_or_else(|| SolverError::UnknownShip(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ships.iter().map(|(name, &v0)| (name.as_str(), v0))
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}
