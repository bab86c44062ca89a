//! Shop settings

use jiff::SignedDuration;
use rusty_money::iso::{self, Currency};

/// Default storage key for the persisted cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Runtime behaviour of a [`Storefront`](crate::storefront::Storefront).
#[derive(Debug, Clone)]
pub struct ShopSettings {
    /// Key of the persisted cart slot.
    pub storage_key: String,

    /// Currency all prices are expressed in.
    pub currency: &'static Currency,

    /// How long a notification stays up before it is dismissed automatically.
    pub notification_timeout: SignedDuration,

    /// Maximum number of notifications on screen; older ones are evicted.
    pub notification_limit: usize,

    /// Check email and phone format on checkout, on top of required fields.
    pub validate_contact: bool,

    /// Distance in pixels from the viewport bottom at which elements reveal.
    pub reveal_offset: f64,

    /// Quiet period after the last scroll event before reveal is checked.
    pub scroll_debounce: SignedDuration,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: iso::MDL,
            notification_timeout: SignedDuration::from_secs(5),
            notification_limit: 5,
            validate_contact: true,
            reveal_offset: 150.0,
            scroll_debounce: SignedDuration::from_millis(100),
        }
    }
}
