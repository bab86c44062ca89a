//! Shop Config

use std::path::PathBuf;

use clap::{ArgAction, Args};

/// Shop behaviour settings.
#[derive(Debug, Args)]
pub struct ShopConfig {
    /// ISO 4217 currency code prices are expressed in
    #[arg(long, env = "BEESHOP_CURRENCY", default_value = "MDL")]
    pub currency: String,

    /// Seconds a notification stays on screen
    #[arg(long, env = "BEESHOP_NOTIFICATION_TIMEOUT_SECS", default_value_t = 5_u64)]
    pub notification_timeout_secs: u64,

    /// Maximum number of notifications on screen
    #[arg(long, env = "BEESHOP_NOTIFICATION_LIMIT", default_value_t = 5_usize)]
    pub notification_limit: usize,

    /// Check email and phone format on checkout
    #[arg(
        long,
        env = "BEESHOP_VALIDATE_CONTACT",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub validate_contact: bool,

    /// Product catalog YAML; the bundled catalog is used when omitted
    #[arg(long, env = "BEESHOP_CATALOG")]
    pub catalog: Option<PathBuf>,
}
