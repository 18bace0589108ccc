//! High-level runtime engine settings
//!
//! How many steps make up one presentation frame, and whether the
//! pairwise pass runs on the rayon pool, used when building and running
//! a `Scenario`

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub steps_per_frame: u32, // steps run per `run_frame`, at least 1
    pub parallel: bool, // false = serial pair pass, true = rayon pair pass
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            steps_per_frame: 10,
            parallel: false,
        }
    }
}

impl Engine {
    pub fn validate(&self) -> Result<()> {
        if self.steps_per_frame < 1 {
            return Err(Error::InvalidConfig("steps_per_frame must be >= 1".into()));
        }
        Ok(())
    }
}
