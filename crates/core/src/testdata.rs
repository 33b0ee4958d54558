//! Synthetic entity factory for tests and seeding.
//!
//! Natural keys (`username`, `email`, `sku`, `order_number`) must be unique
//! across repeated invocations within a process, and must not collide with
//! leftovers from earlier runs against the same store. The factory stamps
//! every key with a run tag (epoch milliseconds plus a short random suffix)
//! and a per-factory sequence number. That is collision-resistant enough for
//! test isolation; it is not cryptographically unique.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rust_decimal::Decimal;

use crate::entities::{NewOrder, NewOrderItem, NewProduct, NewUser};
use crate::types::{Email, OrderStatus, ProductId, UserId};

const CATEGORIES: [&str; 4] = ["electronics", "books", "clothing", "home"];
const BRANDS: [&str; 4] = ["Acme", "Globex", "Initech", "Umbrella"];

/// Factory for mutually unique, syntactically valid entity payloads.
///
/// Values are deterministic in shape: prices, quantities, and display names
/// derive from the sequence number, so two entities from one factory differ
/// in more than their keys.
#[derive(Debug)]
pub struct TestDataFactory {
    run_tag: String,
    seq: AtomicU64,
}

impl TestDataFactory {
    /// Create a factory with a fresh run tag.
    #[must_use]
    pub fn new() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: String = rand::rng()
            .sample_iter(rand::distr::Alphanumeric)
            .take(6)
            .map(char::from)
            .collect();
        Self {
            run_tag: format!("{millis}{}", suffix.to_lowercase()),
            seq: AtomicU64::new(0),
        }
    }

    /// The uniqueness prefix stamped into every natural key.
    #[must_use]
    pub fn run_tag(&self) -> &str {
        &self.run_tag
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// A user with unique `username` and `email`.
    ///
    /// Some optional contact fields are filled and some left empty, so
    /// partial-update tests have both populated and untouched columns.
    ///
    /// # Panics
    ///
    /// Panics if the generated email fails validation. This should never
    /// happen: the address is built from the run tag and sequence number
    /// and stays well inside the length limit.
    #[must_use]
    pub fn user(&self) -> NewUser {
        let n = self.next_seq();
        let tag = &self.run_tag;
        let email = format!("user_{tag}_{n}@example.com");
        NewUser {
            username: format!("user_{tag}_{n}"),
            email: Email::parse(&email).expect("factory emails are structurally valid"),
            password: "Password123!".to_owned(),
            first_name: "Test".to_owned(),
            last_name: format!("User{n}"),
            phone: Some(format!("+1555{n:07}")),
            address: None,
            city: Some("Springfield".to_owned()),
            country: None,
            postal_code: None,
        }
    }

    /// A user with overrides applied on top of the generated payload.
    #[must_use]
    pub fn user_with(&self, customize: impl FnOnce(&mut NewUser)) -> NewUser {
        let mut user = self.user();
        customize(&mut user);
        user
    }

    /// A batch of `n` mutually unique users.
    #[must_use]
    pub fn users(&self, n: usize) -> Vec<NewUser> {
        (0..n).map(|_| self.user()).collect()
    }

    /// A product with a unique `sku`.
    #[must_use]
    pub fn product(&self) -> NewProduct {
        let n = self.next_seq();
        let seq = i64::try_from(n).unwrap_or(i64::MAX);
        let idx = usize::try_from(n).unwrap_or(usize::MAX) % CATEGORIES.len();
        NewProduct {
            name: format!("Test Product {n}"),
            description: format!("Synthetic catalog entry #{n}"),
            price: Decimal::new(999 + seq * 100, 2),
            category: (*CATEGORIES.get(idx).unwrap_or(&"general")).to_owned(),
            brand: (*BRANDS.get(idx).unwrap_or(&"Acme")).to_owned(),
            stock_quantity: 10 + i32::try_from(n % 90).unwrap_or(0),
            sku: format!("SKU-{}-{n}", self.run_tag.to_uppercase()),
            image_url: None,
            is_active: None,
        }
    }

    /// A product with overrides applied on top of the generated payload.
    #[must_use]
    pub fn product_with(&self, customize: impl FnOnce(&mut NewProduct)) -> NewProduct {
        let mut product = self.product();
        customize(&mut product);
        product
    }

    /// A batch of `n` mutually unique products.
    #[must_use]
    pub fn products(&self, n: usize) -> Vec<NewProduct> {
        (0..n).map(|_| self.product()).collect()
    }

    /// An order for `user_id` with a unique `order_number`.
    #[must_use]
    pub fn order(&self, user_id: UserId) -> NewOrder {
        let n = self.next_seq();
        let seq = i64::try_from(n).unwrap_or(i64::MAX);
        NewOrder {
            user_id,
            order_number: format!("ORD-{}-{n}", self.run_tag.to_uppercase()),
            total_amount: Decimal::new(4999 + seq * 500, 2),
            status: OrderStatus::Pending,
            shipping_address: "123 Test Street, Springfield".to_owned(),
            billing_address: "123 Test Street, Springfield".to_owned(),
            payment_method: "credit_card".to_owned(),
        }
    }

    /// An order with overrides applied on top of the generated payload.
    #[must_use]
    pub fn order_with(&self, user_id: UserId, customize: impl FnOnce(&mut NewOrder)) -> NewOrder {
        let mut order = self.order(user_id);
        customize(&mut order);
        order
    }

    /// A line item for `product_id`. Totals are quantity times unit price,
    /// but nothing downstream recomputes or checks that.
    #[must_use]
    pub fn order_item(&self, product_id: ProductId) -> NewOrderItem {
        let n = self.next_seq();
        let quantity = 1 + i32::try_from(n % 5).unwrap_or(0);
        let unit_price = Decimal::new(1999, 2);
        NewOrderItem {
            product_id,
            quantity,
            unit_price,
            total_price: unit_price * Decimal::from(quantity),
        }
    }
}

impl Default for TestDataFactory {
    fn default() -> Self {
        Self::new()
    }
}
