//! Panels
//!
//! Visibility of the cart side panel (with its overlay) and the mobile
//! navigation menu (with its hamburger button). The two never stay open
//! together.

/// Open/closed state of the slide-in surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    cart_open: bool,
    menu_open: bool,
}

impl Panels {
    /// Both surfaces closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the cart panel and its overlay. Closes the mobile menu.
    pub fn toggle_cart(&mut self) {
        self.cart_open = !self.cart_open;
        self.menu_open = false;
    }

    /// Close the cart panel if it is open.
    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Flip the mobile menu and hamburger. Opening it closes the cart panel.
    pub fn toggle_mobile_menu(&mut self) {
        self.menu_open = !self.menu_open;

        if self.menu_open {
            self.cart_open = false;
        }
    }

    /// Close the mobile menu, as a click on a navigation link does.
    pub fn close_mobile_menu(&mut self) {
        self.menu_open = false;
    }

    /// Whether the cart panel (and overlay) is shown.
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Whether the mobile menu (and active hamburger) is shown.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }
}
