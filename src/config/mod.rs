// src/config/mod.rs
// Service configuration: loaded once from the environment (and .env if present)

use once_cell::sync::Lazy;
use std::str::FromStr;

use crate::llm::provider::ProviderKind;
use crate::persona::PersonaTier;

/// How the active persona is chosen for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaMode {
    /// Message-count tiers (deterministic)
    Tiered,
    /// Random persona per session id, remembered for the life of the process
    Session,
}

impl FromStr for PersonaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiered" | "count" => Ok(PersonaMode::Tiered),
            "session" | "random" => Ok(PersonaMode::Session),
            other => Err(format!("unknown persona mode '{}'", other)),
        }
    }
}

/// Settings the response pipeline needs. Constructed from [`HoneypotConfig`]
/// in production and directly in tests.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub persona_tiers: Vec<PersonaTier>,
    pub persona_mode: PersonaMode,
    pub handover_keywords: Vec<String>,
    /// `None` renders the whole history into the prompt
    pub history_window: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            persona_tiers: PersonaTier::defaults(),
            persona_mode: PersonaMode::Tiered,
            handover_keywords: default_handover_keywords(),
            history_window: None,
        }
    }
}

pub fn default_handover_keywords() -> Vec<String> {
    ["robot", "fake", "bot", "police", "cyber cell", "machine"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct HoneypotConfig {
    // ── Server
    pub host: String,
    pub port: u16,
    pub api_key: String,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,
    pub migrations_dir: String,

    // ── Pipeline
    pub persona_tiers: String,
    pub persona_mode: String,
    pub handover_keywords: String,
    pub history_window: usize,

    // ── Providers
    pub provider_order: String,
    pub provider_timeout_secs: u64,
    pub gemini_models: String,
    pub openai_models: String,
    pub anthropic_models: String,
    pub deepseek_models: String,

    // ── Forensics
    pub report_url: String,
    pub report_team: String,
    pub bait_amount: String,
    pub bait_link_base: String,

    // ── Logging
    pub log_level: String,
}

// Values may carry trailing `# comments` in .env files
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

/// Split a comma separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

impl HoneypotConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            host: env_var_or("HONEYPOT_HOST", "0.0.0.0".to_string()),
            port: env_var_or("HONEYPOT_PORT", 10000),
            api_key: env_var_or("HONEYPOT_API_KEY", "12345".to_string()),
            database_url: env_var_or("DATABASE_URL", "sqlite:./scamhunter.db?mode=rwc".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            migrations_dir: env_var_or("MIGRATIONS_DIR", "./migrations".to_string()),
            persona_tiers: env_var_or(
                "PERSONA_TIERS",
                "savitri:0,priya:4,ramesh:8,rahul:12".to_string(),
            ),
            persona_mode: env_var_or("PERSONA_MODE", "tiered".to_string()),
            handover_keywords: env_var_or(
                "HANDOVER_KEYWORDS",
                default_handover_keywords().join(","),
            ),
            history_window: env_var_or("HISTORY_WINDOW", 0),
            provider_order: env_var_or(
                "PROVIDER_ORDER",
                "gemini,openai,anthropic,deepseek".to_string(),
            ),
            provider_timeout_secs: env_var_or("PROVIDER_TIMEOUT_SECS", 30),
            gemini_models: env_var_or(
                "GEMINI_MODELS",
                "gemini-1.5-flash,gemini-1.5-pro,gemini-pro".to_string(),
            ),
            openai_models: env_var_or("OPENAI_MODELS", "gpt-4o-mini,gpt-4o".to_string()),
            anthropic_models: env_var_or(
                "ANTHROPIC_MODELS",
                "claude-3-5-haiku-latest,claude-3-5-sonnet-latest".to_string(),
            ),
            deepseek_models: env_var_or("DEEPSEEK_MODELS", "deepseek-chat".to_string()),
            report_url: env_var_or("REPORT_URL", String::new()),
            report_team: env_var_or("REPORT_TEAM", "ScamHunters".to_string()),
            bait_amount: env_var_or("BAIT_AMOUNT", "5000".to_string()),
            bait_link_base: env_var_or(
                "BAIT_LINK_BASE",
                "http://localhost:10000/assets".to_string(),
            ),
            log_level: env_var_or("LOG_LEVEL", "info".to_string()),
        }
    }

    /// Pipeline settings derived from the raw environment values. Invalid
    /// tier or mode strings fall back to defaults with a warning.
    pub fn pipeline(&self) -> PipelineConfig {
        let persona_tiers = match PersonaTier::parse_list(&self.persona_tiers) {
            Ok(tiers) => tiers,
            Err(e) => {
                tracing::warn!("Invalid PERSONA_TIERS ({}), using defaults", e);
                PersonaTier::defaults()
            }
        };

        let persona_mode = self.persona_mode.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid PERSONA_MODE ({}), using tiered", e);
            PersonaMode::Tiered
        });

        PipelineConfig {
            persona_tiers,
            persona_mode,
            handover_keywords: split_list(&self.handover_keywords),
            history_window: (self.history_window > 0).then_some(self.history_window),
        }
    }

    /// Providers in priority order; unknown names are skipped
    pub fn provider_order(&self) -> Vec<ProviderKind> {
        split_list(&self.provider_order)
            .iter()
            .filter_map(|name| match name.parse::<ProviderKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    tracing::warn!("Ignoring provider in PROVIDER_ORDER: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn models_for(&self, kind: ProviderKind) -> Vec<String> {
        let raw = match kind {
            ProviderKind::Gemini => &self.gemini_models,
            ProviderKind::OpenAi => &self.openai_models,
            ProviderKind::Anthropic => &self.anthropic_models,
            ProviderKind::DeepSeek => &self.deepseek_models,
        };
        split_list(raw)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub static CONFIG: Lazy<HoneypotConfig> = Lazy::new(HoneypotConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaId;

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list(" a, ,b ,,c"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_persona_mode_parse() {
        assert_eq!("Session".parse::<PersonaMode>().unwrap(), PersonaMode::Session);
        assert_eq!("tiered".parse::<PersonaMode>().unwrap(), PersonaMode::Tiered);
        assert!("whatever".parse::<PersonaMode>().is_err());
    }

    fn raw_config() -> HoneypotConfig {
        HoneypotConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_key: "k".to_string(),
            database_url: "sqlite::memory:".to_string(),
            sqlite_max_connections: 1,
            migrations_dir: "./migrations".to_string(),
            persona_tiers: "savitri:0,priya:4,ramesh:8,rahul:12".to_string(),
            persona_mode: "tiered".to_string(),
            handover_keywords: "robot, police ,".to_string(),
            history_window: 0,
            provider_order: "gemini,openai".to_string(),
            provider_timeout_secs: 30,
            gemini_models: "gemini-1.5-flash".to_string(),
            openai_models: "gpt-4o-mini, gpt-4o".to_string(),
            anthropic_models: String::new(),
            deepseek_models: "deepseek-chat".to_string(),
            report_url: String::new(),
            report_team: "ScamHunters".to_string(),
            bait_amount: "5000".to_string(),
            bait_link_base: "http://localhost:10000/assets".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_pipeline_from_raw_values() {
        let mut config = raw_config();
        config.persona_tiers = "rahul:2,savitri:0".to_string();
        config.persona_mode = "Session".to_string();
        config.history_window = 6;

        let pipeline = config.pipeline();
        assert_eq!(
            pipeline.persona_tiers,
            vec![
                PersonaTier { start: 0, persona: PersonaId::Savitri },
                PersonaTier { start: 2, persona: PersonaId::Rahul },
            ]
        );
        assert_eq!(pipeline.persona_mode, PersonaMode::Session);
        assert_eq!(pipeline.handover_keywords, vec!["robot", "police"]);
        assert_eq!(pipeline.history_window, Some(6));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut config = raw_config();
        config.persona_tiers = "nobody:0".to_string();
        config.persona_mode = "sometimes".to_string();
        config.history_window = 0;

        let pipeline = config.pipeline();
        assert_eq!(pipeline.persona_tiers, PersonaTier::defaults());
        assert_eq!(pipeline.persona_mode, PersonaMode::Tiered);
        assert_eq!(pipeline.history_window, None);
    }

    #[test]
    fn test_provider_order_skips_unknown_names() {
        let mut config = raw_config();
        config.provider_order = "claude, mistral ,gemini,,deepseek".to_string();

        assert_eq!(
            config.provider_order(),
            vec![ProviderKind::Anthropic, ProviderKind::Gemini, ProviderKind::DeepSeek]
        );
        assert_eq!(config.models_for(ProviderKind::OpenAi), vec!["gpt-4o-mini", "gpt-4o"]);
        assert!(config.models_for(ProviderKind::Anthropic).is_empty());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.persona_tiers[0].persona, PersonaId::Savitri);
        assert!(config.handover_keywords.iter().any(|k| k == "cyber cell"));
        assert_eq!(config.history_window, None);
    }
}
