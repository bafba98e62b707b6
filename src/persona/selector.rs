// src/persona/selector.rs
// Message-count based persona selection

use super::PersonaId;

/// One half-open range of the tier table: applies from `start` turns up to
/// the next tier's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaTier {
    pub start: usize,
    pub persona: PersonaId,
}

impl PersonaTier {
    pub fn defaults() -> Vec<PersonaTier> {
        vec![
            PersonaTier { start: 0, persona: PersonaId::Savitri },
            PersonaTier { start: 4, persona: PersonaId::Priya },
            PersonaTier { start: 8, persona: PersonaId::Ramesh },
            PersonaTier { start: 12, persona: PersonaId::Rahul },
        ]
    }

    /// Parse `"savitri:0,priya:4"` style lists.
    pub fn parse_list(raw: &str) -> Result<Vec<PersonaTier>, String> {
        let mut tiers = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, start) = entry
                .split_once(':')
                .ok_or_else(|| format!("tier '{}' is missing ':<start>'", entry))?;
            let persona = name.parse::<PersonaId>()?;
            let start = start
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("tier '{}' has a non-numeric start", entry))?;
            tiers.push(PersonaTier { start, persona });
        }

        if tiers.is_empty() {
            return Err("no persona tiers given".to_string());
        }
        tiers.sort_by_key(|t| t.start);
        if tiers.windows(2).any(|w| w[0].start == w[1].start) {
            return Err("duplicate tier start".to_string());
        }
        Ok(tiers)
    }
}

#[derive(Debug, Clone)]
pub struct PersonaSelector {
    tiers: Vec<PersonaTier>,
}

impl PersonaSelector {
    /// Tiers are sorted by start; an empty table gets the defaults.
    pub fn new(mut tiers: Vec<PersonaTier>) -> Self {
        if tiers.is_empty() {
            tiers = PersonaTier::defaults();
        }
        tiers.sort_by_key(|t| t.start);
        Self { tiers }
    }

    /// Persona for a conversation that already has `turn_count` turns.
    /// Counts below the first tier's start fall into the first tier.
    pub fn select(&self, turn_count: usize) -> PersonaId {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.start <= turn_count)
            .unwrap_or(&self.tiers[0])
            .persona
    }

    /// `(persona id, system prompt)` pair for a turn count
    pub fn select_with_prompt(&self, turn_count: usize) -> (PersonaId, &'static str) {
        let persona = self.select(turn_count);
        (persona, persona.prompt())
    }
}

impl Default for PersonaSelector {
    fn default() -> Self {
        Self::new(PersonaTier::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_boundaries() {
        let selector = PersonaSelector::default();
        assert_eq!(selector.select(0), PersonaId::Savitri);
        assert_eq!(selector.select(3), PersonaId::Savitri);
        assert_eq!(selector.select(4), PersonaId::Priya);
        assert_eq!(selector.select(7), PersonaId::Priya);
        assert_eq!(selector.select(8), PersonaId::Ramesh);
        assert_eq!(selector.select(12), PersonaId::Rahul);
        assert_eq!(selector.select(10_000), PersonaId::Rahul);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let selector = PersonaSelector::default();
        for n in 0..50 {
            assert_eq!(selector.select(n), selector.select(n));
        }
    }

    #[test]
    fn test_count_below_first_tier_uses_first_tier() {
        let selector = PersonaSelector::new(vec![
            PersonaTier { start: 2, persona: PersonaId::Ramesh },
            PersonaTier { start: 5, persona: PersonaId::Rahul },
        ]);
        assert_eq!(selector.select(0), PersonaId::Ramesh);
        assert_eq!(selector.select(5), PersonaId::Rahul);
    }

    #[test]
    fn test_parse_list_sorts_and_validates() {
        let tiers = PersonaTier::parse_list("rahul:6, savitri:0 ,priya:2").unwrap();
        assert_eq!(
            tiers.iter().map(|t| t.persona).collect::<Vec<_>>(),
            vec![PersonaId::Savitri, PersonaId::Priya, PersonaId::Rahul]
        );

        assert!(PersonaTier::parse_list("").is_err());
        assert!(PersonaTier::parse_list("savitri").is_err());
        assert!(PersonaTier::parse_list("savitri:x").is_err());
        assert!(PersonaTier::parse_list("nobody:0").is_err());
        assert!(PersonaTier::parse_list("savitri:0,rahul:0").is_err());
    }

    #[test]
    fn test_select_with_prompt_matches_registry() {
        let selector = PersonaSelector::default();
        let (id, prompt) = selector.select_with_prompt(0);
        assert_eq!(id, PersonaId::Savitri);
        assert!(prompt.contains("Savitri Devi"));
    }
}
