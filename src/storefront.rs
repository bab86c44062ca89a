//! Storefront
//!
//! Event handlers for the shop page. Each handler mutates the cart store,
//! which persists itself, then re-renders the cart panel and queues any
//! user-facing notification.

use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    contact::{CONTACT_SENT_MESSAGE, ContactError, ContactForm, ContactGateway},
    checkout::{CheckoutError, CheckoutForm, OrderConfirmation, OrderGateway, OrderPayload},
    notifications::{NotificationKey, Notifications, Severity},
    products::{Product, ProductId},
    settings::ShopSettings,
    storage::Storage,
    store::{CartStore, QuantityUpdate, StoreError},
    utils::Debouncer,
    view::{CartView, CartViewModel, CheckoutModal, Panels, ScrollReveal},
};

/// Notification shown after an item is removed.
pub const REMOVED_MESSAGE: &str = "Produsul a fost eliminat din coș!";

/// Notification shown when checkout is attempted on an empty cart.
pub const EMPTY_CART_WARNING: &str = "Coșul tău este gol!";

/// Notification shown once an order has been accepted.
pub const ORDER_PLACED_MESSAGE: &str =
    "Comanda ta a fost plasată cu succes! Vom contacta în curând.";

/// Notification shown when the order service did not take the order.
pub const ORDER_FAILED_MESSAGE: &str = "Comanda nu a putut fi plasată. Încearcă din nou.";

/// Notification shown when a quantity change was refused.
pub const QUANTITY_REFUSED_MESSAGE: &str = "Cantitatea nu a putut fi modificată.";

/// Notification shown when the cart could not be written to storage.
pub const SAVE_FAILED_MESSAGE: &str = "Coșul nu a putut fi salvat pe acest dispozitiv.";

/// The shop page: cart store, rendered cart panel, notifications, panels,
/// scroll reveal, the checkout modal and the order gateway.
#[derive(Debug)]
pub struct Storefront<S: Storage, G: OrderGateway> {
    store: CartStore<S>,
    view: CartView,
    rendered: CartViewModel,
    notifications: Notifications,
    panels: Panels,
    reveal: ScrollReveal,
    scroll: Debouncer,
    checkout: Option<CheckoutModal>,
    gateway: G,
    settings: ShopSettings,
}

impl<S: Storage, G: OrderGateway> Storefront<S, G> {
    /// Load the persisted cart and render it.
    pub fn new(storage: S, gateway: G, settings: ShopSettings) -> Self {
        let store = CartStore::load(storage, settings.storage_key.clone(), settings.currency);
        let view = CartView::new(settings.currency);
        let rendered = view.render(store.cart());

        Self {
            store,
            view,
            rendered,
            notifications: Notifications::new(
                settings.notification_timeout,
                settings.notification_limit,
            ),
            panels: Panels::new(),
            reveal: ScrollReveal::new(settings.reveal_offset),
            scroll: Debouncer::new(settings.scroll_debounce),
            checkout: None,
            gateway,
            settings,
        }
    }

    /// Add units of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the item was refused or the cart could not
    /// be saved. Either way the user has already been notified.
    pub fn add_to_cart(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<u32, StoreError> {
        let result = self.store.add_item(id, name, unit_price, quantity);

        match &result {
            Ok(_) | Err(StoreError::Storage(_)) => {
                self.render();
                self.notify(format!("{name} a fost adăugat în coș!"), Severity::Success);
            }
            Err(StoreError::Cart(error)) => {
                warn!(%id, %error, "item refused");
                self.notify(
                    format!("{name} nu a putut fi adăugat în coș."),
                    Severity::Error,
                );
            }
        }

        self.report_save_failure(&result);

        result
    }

    /// Add units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// See [`Storefront::add_to_cart`].
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> Result<u32, StoreError> {
        self.add_to_cart(product.id, &product.name, product.price, quantity)
    }

    /// Remove a product's line. Unknown products are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the cart could not be saved.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), StoreError> {
        let result = self.store.remove_item(id).map(|_| ());

        self.render();
        self.notify(REMOVED_MESSAGE, Severity::Info);
        self.report_save_failure(&result);

        result
    }

    /// Set a line's quantity, as the `-`/`+` buttons do. Zero or below
    /// removes the line like [`Storefront::remove_from_cart`].
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the change was refused or the cart could
    /// not be saved.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        quantity: i64,
    ) -> Result<QuantityUpdate, StoreError> {
        let result = self.store.set_quantity(id, quantity);

        match &result {
            Ok(QuantityUpdate::Missing) => {}
            Ok(QuantityUpdate::Removed(_)) => {
                self.render();
                self.notify(REMOVED_MESSAGE, Severity::Info);
            }
            Ok(QuantityUpdate::Updated(_)) | Err(StoreError::Storage(_)) => self.render(),
            Err(StoreError::Cart(error)) => {
                warn!(%id, %error, "quantity refused");
                self.notify(QUANTITY_REFUSED_MESSAGE, Severity::Error);
            }
        }

        self.report_save_failure(&result);

        result
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the cart could not be saved.
    pub fn clear_cart(&mut self) -> Result<(), StoreError> {
        let result = self.store.clear();

        self.render();
        self.report_save_failure(&result);

        result
    }

    /// Flip the cart panel. Closes the mobile menu.
    pub fn toggle_cart(&mut self) {
        self.panels.toggle_cart();
    }

    /// A click on the cart overlay toggles the cart panel.
    pub fn overlay_clicked(&mut self) {
        self.panels.toggle_cart();
    }

    /// Flip the mobile navigation menu.
    pub fn toggle_mobile_menu(&mut self) {
        self.panels.toggle_mobile_menu();
    }

    /// A click on a navigation link closes the mobile menu.
    pub fn nav_link_clicked(&mut self) {
        self.panels.close_mobile_menu();
    }

    /// Page scrolled at `now`. Reveal is checked by
    /// [`Storefront::settle_scroll`] once scrolling pauses.
    pub fn scrolled(&mut self, now: Timestamp) {
        self.scroll.trigger(now);
    }

    /// Check reveal if the scroll debounce has elapsed at `now`. Returns the
    /// elements that came into view, or nothing while scrolling continues.
    pub fn settle_scroll(
        &mut self,
        now: Timestamp,
        element_tops: &[f64],
        viewport_height: f64,
    ) -> Vec<usize> {
        if self.scroll.poll(now) {
            self.reveal_visible(element_tops, viewport_height)
        } else {
            Vec::new()
        }
    }

    /// Reveal every element already in view, as on page load.
    pub fn reveal_visible(&mut self, element_tops: &[f64], viewport_height: f64) -> Vec<usize> {
        self.reveal.on_scroll(element_tops, viewport_height)
    }

    /// Open the checkout modal with a snapshot of the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`], after warning the user, if
    /// there is nothing to order.
    pub fn checkout(&mut self) -> Result<&CheckoutModal, CheckoutError> {
        if self.store.cart().is_empty() {
            self.notify(EMPTY_CART_WARNING, Severity::Warning);

            return Err(CheckoutError::EmptyCart);
        }

        let modal = self.view.open_checkout(self.store.cart());

        Ok(self.checkout.insert(modal))
    }

    /// Dismiss the checkout modal.
    pub fn close_checkout(&mut self) {
        self.checkout = None;
    }

    /// Submit the checkout form.
    ///
    /// The order is built from the modal snapshot. On acceptance the cart is
    /// cleared and the modal and cart panel close. On any failure the cart
    /// and modal are kept and the user is told why.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NotOpen`]: no checkout modal is open.
    /// - [`CheckoutError::Invalid`]: required or malformed fields.
    /// - [`CheckoutError::Order`]: the gateway did not accept the order.
    pub fn submit_order(
        &mut self,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let modal = self.checkout.as_ref().ok_or(CheckoutError::NotOpen)?;

        if let Err(errors) = form.validate(self.settings.validate_contact) {
            self.notify(format!("Verifică datele: {errors}"), Severity::Error);

            return Err(CheckoutError::Invalid(errors));
        }

        let payload = OrderPayload::new(form, modal);

        let confirmation = match self.gateway.place_order(&payload) {
            Ok(confirmation) => confirmation,
            Err(error) => {
                warn!(%error, "order not placed");
                self.notify(ORDER_FAILED_MESSAGE, Severity::Error);

                return Err(error.into());
            }
        };

        debug!(order_id = confirmation.order_id, "order confirmed");

        self.notify(ORDER_PLACED_MESSAGE, Severity::Success);

        let cleared = self.store.clear();
        self.report_save_failure(&cleared);
        self.render();

        self.checkout = None;
        self.panels.close_cart();

        Ok(confirmation)
    }

    /// Send the contact form through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError`], after telling the user, if the form is
    /// incomplete or the message was not delivered.
    pub fn submit_contact(
        &mut self,
        gateway: &mut impl ContactGateway,
        form: &ContactForm,
    ) -> Result<(), ContactError> {
        let result = form
            .validate(self.settings.validate_contact)
            .and_then(|()| gateway.send_message(form));

        match &result {
            Ok(()) => {
                self.notify(CONTACT_SENT_MESSAGE, Severity::Success);
            }
            Err(error) => {
                warn!(%error, "contact message not sent");
                self.notify(error.notice(), Severity::Error);
            }
        }

        result
    }

    /// Show a notification banner.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationKey {
        self.notifications.push(message, severity, Timestamp::now())
    }

    /// Dismiss a banner. Already-dismissed banners are ignored.
    pub fn dismiss_notification(&mut self, key: NotificationKey) -> bool {
        self.notifications.dismiss(key).is_some()
    }

    /// Expire banners whose timeout has elapsed at `now`.
    pub fn tick(&mut self, now: Timestamp) -> usize {
        self.notifications.expire(now)
    }

    /// Rebuild the cart panel model from the current cart.
    pub fn render(&mut self) {
        self.rendered = self.view.render(self.store.cart());
    }

    /// Last rendered cart panel.
    pub fn cart_view(&self) -> &CartViewModel {
        &self.rendered
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// Cart store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Live notification banners.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Panel visibility.
    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    /// Scroll reveal state.
    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    /// Open checkout modal, if any.
    pub fn checkout_modal(&self) -> Option<&CheckoutModal> {
        self.checkout.as_ref()
    }

    /// Order gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Settings the storefront was built with.
    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }

    fn report_save_failure<T>(&mut self, result: &Result<T, StoreError>) {
        if let Err(StoreError::Storage(error)) = result {
            warn!(key = %self.store.key(), %error, "cart not saved");
            self.notify(SAVE_FAILED_MESSAGE, Severity::Error);
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use jiff::SignedDuration;

    use crate::{
        checkout::{FieldProblem, MockOrderGateway, OrderError, SimulatedGateway},
        contact::{CONTACT_FAILED_MESSAGE, ContactField, ContactInbox, MockContactGateway},
        storage::MemoryStorage,
        view::CartItemsView,
    };

    use super::*;

    fn shop() -> Storefront<MemoryStorage, SimulatedGateway> {
        Storefront::new(
            MemoryStorage::new(),
            SimulatedGateway::new(),
            ShopSettings::default(),
        )
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Maria".to_string(),
            email: "maria@example.md".to_string(),
            phone: "069 123 4567".to_string(),
            address: "Balti".to_string(),
        }
    }

    fn last_message<S: Storage, G: OrderGateway>(shop: &Storefront<S, G>) -> Option<(Severity, String)> {
        shop.notifications()
            .iter()
            .last()
            .map(|(_, notification)| (notification.severity, notification.message.clone()))
    }

    #[test]
    fn add_renders_and_notifies() -> TestResult {
        let mut shop = shop();

        shop.add_to_cart(ProductId::new(2), "Miere de Tei", Decimal::from(55), 1)?;

        assert_eq!(shop.cart_view().item_count, 1);
        assert_eq!(shop.cart_view().total, "55.00 MDL");
        assert_eq!(
            last_message(&shop),
            Some((Severity::Success, "Miere de Tei a fost adăugat în coș!".to_string()))
        );

        Ok(())
    }

    #[test]
    fn refused_add_notifies_error_and_keeps_cart() {
        let mut shop = shop();

        let result = shop.add_to_cart(ProductId::new(2), "Tei", Decimal::from(55), 0);

        assert!(matches!(result, Err(StoreError::Cart(_))));
        assert!(shop.cart().is_empty());
        assert!(matches!(last_message(&shop), Some((Severity::Error, _))));
    }

    #[test]
    fn quantity_update_is_silent_but_removal_is_not() -> TestResult {
        let mut shop = shop();
        shop.add_to_cart(ProductId::new(1), "Salcam", Decimal::from(45), 1)?;
        let shown = shop.notifications().len();

        shop.update_quantity(ProductId::new(1), 3)?;

        assert_eq!(shop.notifications().len(), shown);
        assert_eq!(shop.cart_view().item_count, 3);

        shop.update_quantity(ProductId::new(1), 0)?;

        assert_eq!(
            last_message(&shop),
            Some((Severity::Info, REMOVED_MESSAGE.to_string()))
        );
        assert!(matches!(shop.cart_view().items, CartItemsView::Empty(_)));

        Ok(())
    }

    #[test]
    fn checkout_on_empty_cart_warns() {
        let mut shop = shop();

        assert!(matches!(shop.checkout(), Err(CheckoutError::EmptyCart)));
        assert!(shop.checkout_modal().is_none());
        assert_eq!(
            last_message(&shop),
            Some((Severity::Warning, EMPTY_CART_WARNING.to_string()))
        );
    }

    #[test]
    fn submit_without_modal_is_refused() {
        let mut shop = shop();

        assert!(matches!(
            shop.submit_order(&form()),
            Err(CheckoutError::NotOpen)
        ));
    }

    #[test]
    fn accepted_order_clears_cart_and_closes_surfaces() -> TestResult {
        let mut shop = shop();
        shop.add_to_cart(ProductId::new(1), "Salcam", Decimal::from(45), 2)?;
        shop.toggle_cart();
        shop.checkout()?;

        let confirmation = shop.submit_order(&form())?;

        assert_eq!(confirmation.order_id, 1);
        assert!(shop.cart().is_empty());
        assert!(shop.checkout_modal().is_none());
        assert!(!shop.panels().is_cart_open());
        assert_eq!(shop.gateway().orders().len(), 1);
        assert_eq!(
            last_message(&shop),
            Some((Severity::Success, ORDER_PLACED_MESSAGE.to_string()))
        );

        Ok(())
    }

    #[test]
    fn invalid_form_keeps_modal_open() -> TestResult {
        let mut shop = shop();
        shop.add_to_cart(ProductId::new(1), "Salcam", Decimal::from(45), 1)?;
        shop.checkout()?;

        let result = shop.submit_order(&CheckoutForm {
            email: "maria".to_string(),
            ..form()
        });

        assert!(matches!(result, Err(CheckoutError::Invalid(_))));
        assert!(shop.checkout_modal().is_some());
        assert_eq!(shop.cart().len(), 1);
        assert!(shop.gateway().orders().is_empty());

        Ok(())
    }

    #[test]
    fn rejected_order_preserves_cart() -> TestResult {
        let mut gateway = MockOrderGateway::new();
        gateway
            .expect_place_order()
            .times(1)
            .returning(|_| Err(OrderError::Rejected("out of delivery area".to_string())));

        let mut shop = Storefront::new(MemoryStorage::new(), gateway, ShopSettings::default());
        shop.add_to_cart(ProductId::new(4), "Propolis", Decimal::from(85), 1)?;
        shop.toggle_cart();
        shop.checkout()?;

        let result = shop.submit_order(&form());

        assert!(matches!(
            result,
            Err(CheckoutError::Order(OrderError::Rejected(_)))
        ));
        assert_eq!(shop.cart().len(), 1);
        assert!(shop.checkout_modal().is_some());
        assert!(shop.panels().is_cart_open());
        assert!(matches!(last_message(&shop), Some((Severity::Error, _))));

        Ok(())
    }

    #[test]
    fn overlay_and_nav_clicks_close_surfaces() {
        let mut shop = shop();

        shop.toggle_cart();
        assert!(shop.panels().is_cart_open());

        shop.overlay_clicked();
        assert!(!shop.panels().is_cart_open());

        shop.toggle_mobile_menu();
        assert!(shop.panels().is_menu_open());

        shop.nav_link_clicked();
        assert!(!shop.panels().is_menu_open());
    }

    #[test]
    fn closing_checkout_drops_the_snapshot() -> TestResult {
        let mut shop = shop();
        shop.add_to_cart(ProductId::new(5), "Polen", Decimal::from(65), 1)?;
        shop.checkout()?;

        shop.close_checkout();

        assert!(shop.checkout_modal().is_none());
        assert!(matches!(
            shop.submit_order(&form()),
            Err(CheckoutError::NotOpen)
        ));
        assert_eq!(shop.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn dismissing_twice_is_harmless() {
        let mut shop = shop();
        let key = shop.notify("hello", Severity::Info);

        assert!(shop.dismiss_notification(key));
        assert!(!shop.dismiss_notification(key));
        assert!(shop.notifications().is_empty());
    }

    #[test]
    fn page_load_reveal_uses_configured_offset() {
        let mut shop = Storefront::new(
            MemoryStorage::new(),
            SimulatedGateway::new(),
            ShopSettings {
                reveal_offset: 100.0,
                ..ShopSettings::default()
            },
        );

        assert_eq!(shop.reveal_visible(&[650.0, 750.0], 800.0), vec![0]);
        assert_eq!(shop.reveal_visible(&[500.0, 650.0], 800.0), vec![1]);
        assert!(shop.reveal().is_revealed(0));
    }

    #[test]
    fn scroll_reveal_waits_for_scrolling_to_pause() -> TestResult {
        let mut shop = shop();
        let start = Timestamp::from_second(1_000)?;
        let tops = [500.0, 900.0];

        shop.scrolled(start);
        shop.scrolled(start.checked_add(SignedDuration::from_millis(80))?);

        let early = start.checked_add(SignedDuration::from_millis(150))?;
        assert!(shop.settle_scroll(early, &tops, 800.0).is_empty());
        assert!(!shop.reveal().is_revealed(0));

        let settled = start.checked_add(SignedDuration::from_millis(180))?;
        assert_eq!(shop.settle_scroll(settled, &tops, 800.0), vec![0]);

        let later = start.checked_add(SignedDuration::from_millis(500))?;
        assert!(shop.settle_scroll(later, &[100.0, 100.0], 800.0).is_empty());

        Ok(())
    }

    #[test]
    fn overflowing_snapshot_starts_empty() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.set(
            "cart",
            r#"[{"id":1,"name":"Big","price":70000000000000000000000000000,"quantity":4000000000}]"#,
        )?;

        let shop = Storefront::new(storage, SimulatedGateway::new(), ShopSettings::default());

        assert!(shop.cart().is_empty());
        assert_eq!(shop.cart_view().total, "0.00 MDL");

        Ok(())
    }

    #[test]
    fn overflowing_quantity_is_refused_with_notice() -> TestResult {
        let mut shop = shop();
        shop.add_to_cart(ProductId::new(1), "Big", Decimal::MAX, 1)?;

        let result = shop.update_quantity(ProductId::new(1), 2);

        assert!(matches!(result, Err(StoreError::Cart(_))));
        assert_eq!(shop.cart_view().item_count, 1);
        assert_eq!(
            last_message(&shop),
            Some((Severity::Error, QUANTITY_REFUSED_MESSAGE.to_string()))
        );

        Ok(())
    }

    #[test]
    fn contact_message_is_delivered() -> TestResult {
        let mut shop = shop();
        let mut inbox = ContactInbox::new();

        shop.submit_contact(
            &mut inbox,
            &ContactForm {
                name: "Elena".to_string(),
                email: "elena@example.md".to_string(),
                message: "Livrati in Balti?".to_string(),
            },
        )?;

        assert_eq!(inbox.messages().len(), 1);
        assert_eq!(
            last_message(&shop),
            Some((Severity::Success, CONTACT_SENT_MESSAGE.to_string()))
        );

        Ok(())
    }

    #[test]
    fn invalid_contact_form_is_not_sent() {
        let mut shop = shop();
        let mut gateway = MockContactGateway::new();
        gateway.expect_send_message().never();

        let result = shop.submit_contact(&mut gateway, &ContactForm::default());

        assert_eq!(
            result,
            Err(ContactError::Invalid {
                field: ContactField::Name,
                problem: FieldProblem::Missing,
            })
        );
        assert!(matches!(last_message(&shop), Some((Severity::Error, _))));
    }

    #[test]
    fn undelivered_contact_message_notifies_error() {
        let mut shop = shop();
        let mut gateway = MockContactGateway::new();
        gateway
            .expect_send_message()
            .times(1)
            .returning(|_| Err(ContactError::Unavailable("offline".to_string())));

        let result = shop.submit_contact(
            &mut gateway,
            &ContactForm {
                name: "Elena".to_string(),
                email: "elena@example.md".to_string(),
                message: "Salut".to_string(),
            },
        );

        assert!(matches!(result, Err(ContactError::Unavailable(_))));
        assert_eq!(
            last_message(&shop),
            Some((Severity::Error, CONTACT_FAILED_MESSAGE.to_string()))
        );
    }

    #[test]
    fn tick_expires_notifications() -> TestResult {
        let mut shop = shop();
        shop.notify("hello", Severity::Info);

        let later = Timestamp::now().checked_add(SignedDuration::from_secs(6))?;

        assert_eq!(shop.tick(later), 1);
        assert!(shop.notifications().is_empty());

        Ok(())
    }
}
