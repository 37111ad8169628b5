//! Skill definitions.
//!
//! The four skill kinds form a closed set; behavior is dispatched by matching
//! on [`SkillKind`] in the resolver rather than through per-skill objects.

use strum::{EnumIter, IntoStaticStr};

use crate::error::RosterError;

/// The fixed set of skills every combatant carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    Attack,
    Block,
    Heal,
    Special,
}

impl SkillKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether a trigger of this kind can lower the opponent's health.
    pub const fn deals_damage(self) -> bool {
        matches!(self, SkillKind::Attack | SkillKind::Special)
    }
}

/// Immutable cooldown parameters for one (side, skill) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    pub kind: SkillKind,
    pub cooldown_ms: u64,
    /// Length of the blocking window; only meaningful for [`SkillKind::Block`].
    pub duration_ms: u64,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, kind: SkillKind, cooldown_ms: u64) -> Self {
        let name = match kind {
            SkillKind::Attack => "Attack",
            SkillKind::Block => "Block",
            SkillKind::Heal => "Heal",
            SkillKind::Special => "Special",
        };
        Self {
            id: id.into(),
            name: name.to_string(),
            kind,
            cooldown_ms,
            duration_ms: 0,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        if self.cooldown_ms == 0 {
            return Err(RosterError::ZeroCooldown {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// The four skills of one side, one per [`SkillKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSet {
    pub attack: SkillDefinition,
    pub block: SkillDefinition,
    pub heal: SkillDefinition,
    pub special: SkillDefinition,
}

impl SkillSet {
    pub fn get(&self, kind: SkillKind) -> &SkillDefinition {
        match kind {
            SkillKind::Attack => &self.attack,
            SkillKind::Block => &self.block,
            SkillKind::Heal => &self.heal,
            SkillKind::Special => &self.special,
        }
    }

    /// Checks every definition and that each slot holds the matching kind.
    pub fn validate(&self) -> Result<(), RosterError> {
        use strum::IntoEnumIterator;

        for kind in SkillKind::iter() {
            let skill = self.get(kind);
            if skill.kind != kind {
                return Err(RosterError::SkillKindMismatch {
                    id: skill.id.clone(),
                    expected: kind,
                    found: skill.kind,
                });
            }
            skill.validate()?;
        }
        Ok(())
    }
}
