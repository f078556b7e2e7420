//! Skill proficiency dots.
//!
//! Each `.skill-level` element carries `data-level` and `data-total`; the
//! glue replaces its `.level-dots` children with `total` dots, the first
//! `level` of them filled.

use crate::errors::{DeskError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Filled,
    Empty,
}

impl DotState {
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Filled => "level-dot filled",
            Self::Empty => "level-dot empty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLevel {
    pub level: u32,
    pub total: u32,
}

impl SkillLevel {
    /// Parses the raw attribute values. `level` is clamped to `total`.
    pub fn parse(level: &str, total: &str) -> Result<Self> {
        let total = parse_attribute("data-total", total)?;
        let level = parse_attribute("data-level", level)?.min(total);
        Ok(Self { level, total })
    }

    #[must_use]
    pub fn dots(&self) -> Vec<DotState> {
        (0..self.total)
            .map(|i| if i < self.level { DotState::Filled } else { DotState::Empty })
            .collect()
    }
}

fn parse_attribute(attribute: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| DeskError::InvalidSkillAttribute {
        attribute,
        value: value.to_string(),
    })
}
