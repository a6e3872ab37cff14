use crate::error::{PlaygroundError, PlaygroundResult};
use crate::integrator::PhysicsParams;
use crate::skills::{default_skills, load_skills, SkillRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Playground settings, usually read from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Downward acceleration in px/frame²
    pub gravity_strength: f32,
    /// Switch gravity off entirely while keeping `gravity_strength`
    pub zero_gravity: bool,
    pub friction: f32,
    pub bounce: f32,
    pub collision_stiffness: f32,
    pub blast_strength: f32,
    pub blast_softening: f32,
    /// Fixed container size; when unset the host viewport is read once at mount
    pub container_width: Option<f32>,
    pub container_height: Option<f32>,
    /// RNG seed for initial placement; random when unset
    pub seed: Option<u64>,
    /// JSON fixture with skill labels; the built-in list when unset
    pub skills_file: Option<PathBuf>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        let physics = PhysicsParams::default();
        Self {
            gravity_strength: physics.gravity,
            zero_gravity: false,
            friction: physics.friction,
            bounce: physics.bounce,
            collision_stiffness: physics.collision_stiffness,
            blast_strength: physics.blast_strength,
            blast_softening: physics.blast_softening,
            container_width: None,
            container_height: None,
            seed: None,
            skills_file: None,
        }
    }
}

impl PlaygroundConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> PlaygroundResult<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        // Relative fixture paths are resolved against the config's directory
        if let (Some(skills), Some(dir)) = (config.skills_file.as_mut(), path.parent()) {
            if skills.is_relative() {
                *skills = dir.join(&*skills);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(source: &str) -> PlaygroundResult<Self> {
        let config: PlaygroundConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlaygroundResult<()> {
        let finite = [
            ("gravity_strength", self.gravity_strength),
            ("friction", self.friction),
            ("bounce", self.bounce),
            ("collision_stiffness", self.collision_stiffness),
            ("blast_strength", self.blast_strength),
            ("blast_softening", self.blast_softening),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(config_error(format!("{name} must be finite (got {value})")));
            }
        }

        if self.gravity_strength < 0.0 {
            return Err(config_error("gravity_strength must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(config_error("friction must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.bounce) {
            return Err(config_error("bounce must be within [0, 1]"));
        }
        if !(self.collision_stiffness > 0.0 && self.collision_stiffness <= 1.0) {
            return Err(config_error("collision_stiffness must be within (0, 1]"));
        }
        if self.blast_softening <= 0.0 {
            return Err(config_error("blast_softening must be positive"));
        }

        for (name, value) in [
            ("container_width", self.container_width),
            ("container_height", self.container_height),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(config_error(format!("{name} must be positive (got {v})")));
                }
            }
        }
        Ok(())
    }

    pub fn physics_params(&self) -> PhysicsParams {
        PhysicsParams {
            gravity: if self.zero_gravity {
                0.0
            } else {
                self.gravity_strength
            },
            friction: self.friction,
            bounce: self.bounce,
            collision_stiffness: self.collision_stiffness,
            blast_strength: self.blast_strength,
            blast_softening: self.blast_softening,
        }
    }

    /// Skill records from the configured fixture, or the built-in list
    pub fn skills(&self) -> PlaygroundResult<Vec<SkillRecord>> {
        match &self.skills_file {
            Some(path) => load_skills(path),
            None => Ok(default_skills()),
        }
    }
}

fn config_error(message: impl Into<String>) -> PlaygroundError {
    PlaygroundError::Config(message.into())
}
