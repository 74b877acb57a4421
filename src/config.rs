use {crate::domain::checkout::RedirectUrls, std::env};

/// Process configuration, read once at startup and passed down explicitly —
/// the provider client and webhook secret are owned by the composition root,
/// not configured globally.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    pub bind_addr: String,
    pub redirects: RedirectUrls,
}

impl Config {
    /// Reads the environment (and `.env` when present). Panics on missing
    /// required variables — the process cannot run without them.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let app_url =
            env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            database_url: require("DATABASE_URL"),
            stripe_secret_key: require("STRIPE_SECRET_KEY"),
            stripe_webhook_secret: require("STRIPE_WEBHOOK_SECRET"),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            redirects: RedirectUrls {
                success: format!("{app_url}/checkout/success"),
                cancel: format!("{app_url}/checkout/cancel"),
            },
        }
    }
}

fn require(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}
