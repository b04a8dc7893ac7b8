//! The closed set of ship systems and their repair codes.

use std::fmt;

use rand::seq::IndexedRandom;

/// A ship system that can be reported as damaged.
///
/// Serializes as its `snake_case` name (e.g. `life_support`), which is the
/// value clients see in the `damaged_system` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemCode {
    /// Navigation computer.
    Navigation,
    /// Long-range communications array.
    Communications,
    /// Life support.
    LifeSupport,
    /// Main engines.
    Engines,
    /// Forward deflector shield.
    DeflectorShield,
}

impl SystemCode {
    /// Every system, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Navigation,
        Self::Communications,
        Self::LifeSupport,
        Self::Engines,
        Self::DeflectorShield,
    ];

    /// The wire name of this system.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Communications => "communications",
            Self::LifeSupport => "life_support",
            Self::Engines => "engines",
            Self::DeflectorShield => "deflector_shield",
        }
    }

    /// The repair code shown in the repair bay for this system.
    pub const fn repair_code(self) -> &'static str {
        match self {
            Self::Navigation => "NAV-01",
            Self::Communications => "COM-02",
            Self::LifeSupport => "LIFE-03",
            Self::Engines => "ENG-04",
            Self::DeflectorShield => "SHLD-05",
        }
    }

    /// Pick a system uniformly at random.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL.choose(rng).copied().unwrap_or(Self::Navigation)
    }
}

impl fmt::Display for SystemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn repair_codes_are_distinct() {
        let codes: BTreeSet<&str> = SystemCode::ALL.iter().map(|s| s.repair_code()).collect();
        assert_eq!(codes.len(), SystemCode::ALL.len());
    }

    #[test]
    fn code_table_matches_ship_manual() {
        assert_eq!(SystemCode::Navigation.repair_code(), "NAV-01");
        assert_eq!(SystemCode::Communications.repair_code(), "COM-02");
        assert_eq!(SystemCode::LifeSupport.repair_code(), "LIFE-03");
        assert_eq!(SystemCode::Engines.repair_code(), "ENG-04");
        assert_eq!(SystemCode::DeflectorShield.repair_code(), "SHLD-05");
    }

    #[test]
    fn serde_name_matches_wire_name() {
        for system in SystemCode::ALL {
            let json = serde_json::to_value(system).unwrap_or_default();
            assert_eq!(json, serde_json::Value::from(system.name()));
            let back: Option<SystemCode> = serde_json::from_value(json).ok();
            assert_eq!(back, Some(system));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let parsed: Option<SystemCode> =
            serde_json::from_value(serde_json::Value::from("warp_core")).ok();
        assert_eq!(parsed, None);
    }

    #[test]
    fn random_choice_covers_every_system() {
        let mut rng = SmallRng::seed_from_u64(7);
        let seen: BTreeSet<&str> = (0..500)
            .map(|_| SystemCode::random(&mut rng).name())
            .collect();
        assert_eq!(seen.len(), SystemCode::ALL.len());
    }
}
