//! Body catalog and display properties
//!
//! Distances and radii are display units, angular speeds are radians per
//! simulation second.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::TAU;
use std::path::Path;

/// How a body moves
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Orbit {
    /// Pinned at the origin (the Sun)
    Fixed,
    /// Circular orbit around the origin in the xz plane
    Planet { distance: f64, speed: f64 },
    /// Circular orbit around `parent`, tilted by `inclination` radians
    Moon {
        parent: String,
        distance: f64,
        speed: f64,
        inclination: f64,
    },
}

impl Orbit {
    pub fn planet(distance: f64, speed: f64) -> Self {
        Self::Planet { distance, speed }
    }

    pub fn moon(parent: &str, distance: f64, speed: f64, inclination: f64) -> Self {
        Self::Moon {
            parent: parent.to_string(),
            distance,
            speed,
            inclination,
        }
    }

    /// Orbital radius; zero for fixed bodies
    pub fn distance(&self) -> f64 {
        match self {
            Self::Fixed => 0.0,
            Self::Planet { distance, .. } | Self::Moon { distance, .. } => *distance,
        }
    }

    /// Angular speed; zero for fixed bodies
    pub fn speed(&self) -> f64 {
        match self {
            Self::Fixed => 0.0,
            Self::Planet { speed, .. } | Self::Moon { speed, .. } => *speed,
        }
    }

    /// Time for one revolution, None when the body does not move
    pub fn period(&self) -> Option<f64> {
        let speed = self.speed();
        if speed == 0.0 {
            None
        } else {
            Some(TAU / speed.abs())
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Moon { parent, .. } => Some(parent),
            _ => None,
        }
    }

    pub fn is_moon(&self) -> bool {
        matches!(self, Self::Moon { .. })
    }
}

/// One body in the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Display radius
    pub radius: f64,
    pub orbit: Orbit,
}

impl CelestialBody {
    pub fn new(name: &str, radius: f64, orbit: Orbit) -> Self {
        Self {
            name: name.to_string(),
            radius,
            orbit,
        }
    }
}

/// Full body catalog, immutable once a `SolarSystem` is built from it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub bodies: Vec<CelestialBody>,
}

impl SystemConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: SystemConfig = serde_json::from_str(&json)?;
        tracing::info!("Loaded {} bodies from {:?}", config.bodies.len(), path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Check names, parents and numeric fields
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bodies.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicateName(body.name.clone()));
            }

            let checks = [
                ("radius", body.radius),
                ("distance", body.orbit.distance()),
                ("speed", body.orbit.speed()),
            ];
            for (field, value) in checks {
                if !value.is_finite() {
                    return Err(ConfigError::NonFinite { body: body.name.clone(), field });
                }
            }
            if let Orbit::Moon { inclination, .. } = body.orbit {
                if !inclination.is_finite() {
                    return Err(ConfigError::NonFinite {
                        body: body.name.clone(),
                        field: "inclination",
                    });
                }
            }
        }

        for body in &self.bodies {
            let Some(parent) = body.orbit.parent() else {
                continue;
            };
            match self.find(parent) {
                None => {
                    return Err(ConfigError::UnknownParent {
                        moon: body.name.clone(),
                        parent: parent.to_string(),
                    })
                }
                Some(p) if p.orbit.is_moon() => {
                    return Err(ConfigError::NestedMoon {
                        moon: body.name.clone(),
                        parent: parent.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            bodies: vec![
                CelestialBody::new("Sun", 5.0, Orbit::Fixed),

                CelestialBody::new("Mercury", 0.5, Orbit::planet(10.0, 0.005)),
                CelestialBody::new("Venus", 1.5, Orbit::planet(15.0, 0.004)),
                CelestialBody::new("Earth", 2.0, Orbit::planet(20.0, 0.003)),
                CelestialBody::new("Mars", 1.8, Orbit::planet(25.0, 0.002)),
                CelestialBody::new("Jupiter", 5.0, Orbit::planet(40.0, 0.001)),
                CelestialBody::new("Saturn", 4.5, Orbit::planet(60.0, 0.0009)),
                CelestialBody::new("Uranus", 3.0, Orbit::planet(80.0, 0.0008)),
                CelestialBody::new("Neptune", 3.0, Orbit::planet(100.0, 0.0007)),

                CelestialBody::new("Moon", 0.5, Orbit::moon("Earth", 3.0, 0.01, 0.1)),
                CelestialBody::new("Phobos", 0.3, Orbit::moon("Mars", 1.5, 0.015, 0.2)),
                CelestialBody::new("Deimos", 0.2, Orbit::moon("Mars", 2.0, 0.02, 0.3)),
                CelestialBody::new("Io", 1.0, Orbit::moon("Jupiter", 5.0, 0.005, 0.1)),
                CelestialBody::new("Europa", 0.8, Orbit::moon("Jupiter", 7.0, 0.004, 0.2)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let config = SystemConfig::default();
        config.validate().unwrap();

        let planets = config.bodies.iter().filter(|b| matches!(b.orbit, Orbit::Planet { .. })).count();
        let moons = config.bodies.iter().filter(|b| b.orbit.is_moon()).count();
        assert_eq!(planets, 8);
        assert_eq!(moons, 5);
        assert_eq!(config.find("Phobos").unwrap().orbit.parent(), Some("Mars"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut config = SystemConfig::default();
        config.bodies.push(CelestialBody::new("Titan", 1.0, Orbit::moon("Saturnus", 6.0, 0.003, 0.1)));

        match config.validate() {
            Err(ConfigError::UnknownParent { moon, parent }) => {
                assert_eq!(moon, "Titan");
                assert_eq!(parent, "Saturnus");
            }
            other => panic!("expected UnknownParent, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_moon_rejected() {
        let mut config = SystemConfig::default();
        config.bodies.push(CelestialBody::new("Moonmoon", 0.1, Orbit::moon("Moon", 0.5, 0.1, 0.0)));
        assert!(matches!(config.validate(), Err(ConfigError::NestedMoon { .. })));
    }

    #[test]
    fn test_duplicate_and_non_finite_rejected() {
        let mut config = SystemConfig::default();
        config.bodies.push(CelestialBody::new("Earth", 2.0, Orbit::planet(21.0, 0.003)));
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateName(name)) if name == "Earth"));

        let config = SystemConfig {
            bodies: vec![CelestialBody::new("Rogue", 1.0, Orbit::planet(f64::NAN, 0.1))],
        };
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { field: "distance", .. })));

        assert!(matches!(SystemConfig { bodies: vec![] }.validate(), Err(ConfigError::Empty)));
    }

    #[test]
    fn test_period() {
        assert_eq!(Orbit::Fixed.period(), None);
        let period = Orbit::planet(10.0, 0.005).period().unwrap();
        assert!((period - TAU / 0.005).abs() < 1e-9);
    }

    #[test]
    fn test_save_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bodies.json");

        let config = SystemConfig::default();
        config.save(&path).unwrap();
        let loaded = SystemConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"kind\": \"moon\""));
    }
}
