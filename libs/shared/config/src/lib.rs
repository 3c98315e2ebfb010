use std::env;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub maps_base_url: String,
    pub location_timeout_secs: u64,
    pub location_maximum_age_secs: u64,
    pub booking_success_delay_secs: u64,
    pub image_analysis_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_jwt_secret: String::new(),
            maps_base_url: "https://www.google.com/maps".to_string(),
            location_timeout_secs: 20,
            location_maximum_age_secs: 60,
            booking_success_delay_secs: 3,
            image_analysis_delay_ms: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            maps_base_url: env::var("MAPS_BASE_URL")
                .unwrap_or(defaults.maps_base_url),
            location_timeout_secs: numeric_var("LOCATION_TIMEOUT_SECS", defaults.location_timeout_secs),
            location_maximum_age_secs: numeric_var("LOCATION_MAXIMUM_AGE_SECS", defaults.location_maximum_age_secs),
            booking_success_delay_secs: numeric_var("BOOKING_SUCCESS_DELAY_SECS", defaults.booking_success_delay_secs),
            image_analysis_delay_ms: numeric_var("IMAGE_ANALYSIS_DELAY_MS", defaults.image_analysis_delay_ms),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }

    pub fn location_maximum_age(&self) -> Duration {
        Duration::from_secs(self.location_maximum_age_secs)
    }

    pub fn booking_success_delay(&self) -> Duration {
        Duration::from_secs(self.booking_success_delay_secs)
    }

    pub fn image_analysis_delay(&self) -> Duration {
        Duration::from_millis(self.image_analysis_delay_ms)
    }
}

fn numeric_var(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a number ({}), using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
