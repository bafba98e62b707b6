// src/persona/mod.rs
// Persona registry: the characters the honeypot plays when replying to scammers.

pub mod profiles;
pub mod selector;
pub mod session;

pub use profiles::PersonaProfile;
pub use selector::{PersonaSelector, PersonaTier};
pub use session::SessionPersonaStore;

use rand::seq::IndexedRandom;

/// Persona identifiers. The registry is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaId {
    Savitri, // Confused grandmother, the opening bait
    Priya,
    Ramesh,
    Rahul,
}

impl PersonaId {
    pub const ALL: [PersonaId; 4] = [
        PersonaId::Savitri,
        PersonaId::Priya,
        PersonaId::Ramesh,
        PersonaId::Rahul,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Savitri => "savitri",
            PersonaId::Priya => "priya",
            PersonaId::Ramesh => "ramesh",
            PersonaId::Rahul => "rahul",
        }
    }

    /// Full profile from the static registry
    pub fn profile(&self) -> &'static PersonaProfile {
        profiles::lookup(*self)
    }

    /// Returns the behavioral instructions for this persona.
    pub fn prompt(&self) -> &'static str {
        self.profile().system_prompt
    }

    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> PersonaId {
        *Self::ALL.choose(rng).unwrap_or(&PersonaId::Savitri)
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savitri" => Ok(PersonaId::Savitri),
            "priya" => Ok(PersonaId::Priya),
            "ramesh" => Ok(PersonaId::Ramesh),
            "rahul" => Ok(PersonaId::Rahul),
            other => Err(format!("unknown persona '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for id in PersonaId::ALL {
            assert_eq!(id.as_str().parse::<PersonaId>().unwrap(), id);
        }
        assert_eq!(" Rahul ".parse::<PersonaId>().unwrap(), PersonaId::Rahul);
        assert!("nobody".parse::<PersonaId>().is_err());
    }

    #[test]
    fn test_every_persona_has_a_prompt() {
        for id in PersonaId::ALL {
            assert_eq!(id.profile().id, id);
            assert!(!id.prompt().trim().is_empty());
        }
    }
}
