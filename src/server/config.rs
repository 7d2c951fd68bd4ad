use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_INVITATION_SWEEP_SCHEDULE: &str = "0 0 * * * *";

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,

    pub bind_address: String,
    /// `None` allows any origin.
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Six-field cron expression for the invitation expiry sweep.
    pub invitation_sweep_schedule: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                name: "JWT_SECRET".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            cors_allowed_origins: optional("CORS_ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
            invitation_sweep_schedule: optional("INVITATION_SWEEP_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_INVITATION_SWEEP_SCHEDULE.to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
