//! In-memory backing store for the mock server.
//!
//! Mirrors the store-side semantics the services promise: surrogate ids
//! assigned from 1, unique natural keys, foreign keys checked on insert,
//! and cascading deletes. Absence is reported as `None`/`false`; only
//! constraint violations and malformed values become a [`Status`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;
use storelab_core::OrderStatus;
use tonic::Status;

use crate::pb;

#[derive(Debug, Default)]
struct StoreInner {
    users: BTreeMap<i32, pb::User>,
    products: BTreeMap<i32, pb::Product>,
    orders: BTreeMap<i32, pb::Order>,
    items: BTreeMap<i32, pb::OrderItem>,
    user_seq: i32,
    product_seq: i32,
    order_seq: i32,
    item_seq: i32,
}

/// Thread-safe in-memory tables behind one mutex.
///
/// All operations are synchronous and short; handlers lock, mutate, clone
/// the result out, and release before any await point.
#[derive(Debug, Default)]
pub struct MockStore {
    inner: Mutex<StoreInner>,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn paginate<T>(rows: impl Iterator<Item = T>, page: i32, page_size: i32) -> Vec<T> {
    if page_size <= 0 {
        return rows.collect();
    }
    let size = usize::try_from(page_size).unwrap_or(0);
    let skip = usize::try_from(page.max(1) - 1).unwrap_or(0).saturating_mul(size);
    rows.skip(skip).take(size).collect()
}

fn check_decimal(field: &str, value: &str) -> Result<(), Status> {
    value
        .parse::<Decimal>()
        .map(|_| ())
        .map_err(|_| Status::invalid_argument(format!("{field} is not a valid decimal: {value}")))
}

/// Parse a wire status string; empty means "not supplied".
fn parse_status(value: &str) -> Result<Option<OrderStatus>, Status> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<OrderStatus>()
        .map(Some)
        .map_err(|e| Status::invalid_argument(e.to_string()))
}

impl MockStore {
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -- users --------------------------------------------------------------

    /// # Errors
    ///
    /// Fails with `AlreadyExists` when the username or email is taken.
    pub fn create_user(&self, req: pb::CreateUserRequest) -> Result<pb::User, Status> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.username == req.username) {
            return Err(Status::already_exists(format!(
                "username {} already exists",
                req.username
            )));
        }
        if inner.users.values().any(|u| u.email == req.email) {
            return Err(Status::already_exists(format!(
                "email {} already exists",
                req.email
            )));
        }
        let id = next(&mut inner.user_seq);
        let ts = now();
        let user = pb::User {
            id,
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            address: req.address,
            city: req.city,
            country: req.country,
            postal_code: req.postal_code,
            created_at: ts.clone(),
            updated_at: ts,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    #[must_use]
    pub fn get_user(&self, id: i32) -> Option<pb::User> {
        self.lock().users.get(&id).cloned()
    }

    #[must_use]
    pub fn get_user_by_email(&self, email: &str) -> Option<pb::User> {
        self.lock().users.values().find(|u| u.email == email).cloned()
    }

    #[must_use]
    pub fn list_users(&self, page: i32, page_size: i32) -> (Vec<pb::User>, i32) {
        let inner = self.lock();
        let total = count(inner.users.len());
        (paginate(inner.users.values().cloned(), page, page_size), total)
    }

    /// # Errors
    ///
    /// Fails with `AlreadyExists` when moving the username or email to a
    /// value another user holds.
    pub fn update_user(&self, req: pb::UpdateUserRequest) -> Result<Option<pb::User>, Status> {
        let mut inner = self.lock();
        if !inner.users.contains_key(&req.id) {
            return Ok(None);
        }
        if let Some(ref username) = req.username
            && inner
                .users
                .values()
                .any(|u| u.id != req.id && u.username == *username)
        {
            return Err(Status::already_exists(format!(
                "username {username} already exists"
            )));
        }
        if let Some(ref email) = req.email
            && inner
                .users
                .values()
                .any(|u| u.id != req.id && u.email == *email)
        {
            return Err(Status::already_exists(format!("email {email} already exists")));
        }
        let ts = now();
        let Some(user) = inner.users.get_mut(&req.id) else {
            return Ok(None);
        };
        if let Some(username) = req.username {
            user.username = username;
        }
        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(password) = req.password {
            user.password = password;
        }
        if let Some(first_name) = req.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = req.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = req.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = req.address {
            user.address = Some(address);
        }
        if let Some(city) = req.city {
            user.city = Some(city);
        }
        if let Some(country) = req.country {
            user.country = Some(country);
        }
        if let Some(postal_code) = req.postal_code {
            user.postal_code = Some(postal_code);
        }
        user.updated_at = ts;
        Ok(Some(user.clone()))
    }

    #[must_use]
    pub fn delete_user(&self, id: i32) -> bool {
        let mut inner = self.lock();
        if inner.users.remove(&id).is_none() {
            return false;
        }
        let order_ids: Vec<i32> = inner
            .orders
            .values()
            .filter(|o| o.user_id == id)
            .map(|o| o.id)
            .collect();
        inner.orders.retain(|_, o| o.user_id != id);
        inner
            .items
            .retain(|_, item| !order_ids.contains(&item.order_id));
        true
    }

    // -- products -----------------------------------------------------------

    /// # Errors
    ///
    /// Fails with `AlreadyExists` for a duplicate SKU and `InvalidArgument`
    /// when the price does not parse as a decimal.
    pub fn create_product(&self, req: pb::CreateProductRequest) -> Result<pb::Product, Status> {
        let mut inner = self.lock();
        if inner.products.values().any(|p| p.sku == req.sku) {
            return Err(Status::already_exists(format!(
                "sku {} already exists",
                req.sku
            )));
        }
        check_decimal("price", &req.price)?;
        let id = next(&mut inner.product_seq);
        let ts = now();
        let product = pb::Product {
            id,
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            brand: req.brand,
            stock_quantity: req.stock_quantity,
            sku: req.sku,
            image_url: req.image_url.unwrap_or_default(),
            is_active: req.is_active.unwrap_or(true),
            created_at: ts.clone(),
            updated_at: ts,
        };
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    #[must_use]
    pub fn get_product(&self, id: i32) -> Option<pb::Product> {
        self.lock().products.get(&id).cloned()
    }

    #[must_use]
    pub fn get_product_by_sku(&self, sku: &str) -> Option<pb::Product> {
        self.lock().products.values().find(|p| p.sku == sku).cloned()
    }

    #[must_use]
    pub fn list_products(&self, page: i32, page_size: i32) -> (Vec<pb::Product>, i32) {
        let inner = self.lock();
        let total = count(inner.products.len());
        (
            paginate(inner.products.values().cloned(), page, page_size),
            total,
        )
    }

    /// # Errors
    ///
    /// Fails with `AlreadyExists` when moving the SKU to a value another
    /// product holds, and `InvalidArgument` for an unparseable price.
    pub fn update_product(
        &self,
        req: pb::UpdateProductRequest,
    ) -> Result<Option<pb::Product>, Status> {
        let mut inner = self.lock();
        if !inner.products.contains_key(&req.id) {
            return Ok(None);
        }
        if let Some(ref sku) = req.sku
            && inner
                .products
                .values()
                .any(|p| p.id != req.id && p.sku == *sku)
        {
            return Err(Status::already_exists(format!("sku {sku} already exists")));
        }
        if let Some(ref price) = req.price {
            check_decimal("price", price)?;
        }
        let ts = now();
        let Some(product) = inner.products.get_mut(&req.id) else {
            return Ok(None);
        };
        if let Some(name) = req.name {
            product.name = name;
        }
        if let Some(description) = req.description {
            product.description = description;
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(category) = req.category {
            product.category = category;
        }
        if let Some(brand) = req.brand {
            product.brand = brand;
        }
        if let Some(stock_quantity) = req.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(sku) = req.sku {
            product.sku = sku;
        }
        if let Some(image_url) = req.image_url {
            product.image_url = image_url;
        }
        if let Some(is_active) = req.is_active {
            product.is_active = is_active;
        }
        product.updated_at = ts;
        Ok(Some(product.clone()))
    }

    #[must_use]
    pub fn delete_product(&self, id: i32) -> bool {
        let mut inner = self.lock();
        if inner.products.remove(&id).is_none() {
            return false;
        }
        inner.items.retain(|_, item| item.product_id != id);
        true
    }

    // -- orders -------------------------------------------------------------

    /// # Errors
    ///
    /// Fails with `FailedPrecondition` when the user does not exist,
    /// `AlreadyExists` for a duplicate order number, and `InvalidArgument`
    /// for a bad amount or status.
    pub fn create_order(&self, req: pb::CreateOrderRequest) -> Result<pb::Order, Status> {
        let mut inner = self.lock();
        if !inner.users.contains_key(&req.user_id) {
            return Err(Status::failed_precondition(format!(
                "user {} does not exist",
                req.user_id
            )));
        }
        if inner.orders.values().any(|o| o.order_number == req.order_number) {
            return Err(Status::already_exists(format!(
                "order number {} already exists",
                req.order_number
            )));
        }
        check_decimal("total_amount", &req.total_amount)?;
        let status = parse_status(&req.status)?.unwrap_or_default();
        let id = next(&mut inner.order_seq);
        let ts = now();
        let order = pb::Order {
            id,
            user_id: req.user_id,
            order_number: req.order_number,
            total_amount: req.total_amount,
            status: status.as_str().to_owned(),
            shipping_address: req.shipping_address,
            billing_address: req.billing_address,
            payment_method: req.payment_method,
            created_at: ts.clone(),
            updated_at: ts,
        };
        inner.orders.insert(id, order.clone());
        Ok(order)
    }

    #[must_use]
    pub fn get_order(&self, id: i32) -> Option<pb::Order> {
        self.lock().orders.get(&id).cloned()
    }

    #[must_use]
    pub fn get_order_by_number(&self, order_number: &str) -> Option<pb::Order> {
        self.lock()
            .orders
            .values()
            .find(|o| o.order_number == order_number)
            .cloned()
    }

    #[must_use]
    pub fn list_orders(&self, page: i32, page_size: i32) -> (Vec<pb::Order>, i32) {
        let inner = self.lock();
        let total = count(inner.orders.len());
        (
            paginate(inner.orders.values().cloned(), page, page_size),
            total,
        )
    }

    /// # Errors
    ///
    /// Fails with `InvalidArgument` for a bad amount or status.
    pub fn update_order(&self, req: pb::UpdateOrderRequest) -> Result<Option<pb::Order>, Status> {
        let mut inner = self.lock();
        if !inner.orders.contains_key(&req.id) {
            return Ok(None);
        }
        if let Some(ref total_amount) = req.total_amount {
            check_decimal("total_amount", total_amount)?;
        }
        let status = match req.status {
            Some(ref value) => parse_status(value)?,
            None => None,
        };
        let ts = now();
        let Some(order) = inner.orders.get_mut(&req.id) else {
            return Ok(None);
        };
        if let Some(total_amount) = req.total_amount {
            order.total_amount = total_amount;
        }
        if let Some(status) = status {
            order.status = status.as_str().to_owned();
        }
        if let Some(shipping_address) = req.shipping_address {
            order.shipping_address = shipping_address;
        }
        if let Some(billing_address) = req.billing_address {
            order.billing_address = billing_address;
        }
        if let Some(payment_method) = req.payment_method {
            order.payment_method = payment_method;
        }
        order.updated_at = ts;
        Ok(Some(order.clone()))
    }

    /// Unconditional transition: any status may replace any status.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` when the status is empty or not part of
    /// the vocabulary.
    pub fn update_order_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Option<pb::Order>, Status> {
        let parsed = parse_status(status)?
            .ok_or_else(|| Status::invalid_argument("status must not be empty"))?;
        let mut inner = self.lock();
        let ts = now();
        let Some(order) = inner.orders.get_mut(&id) else {
            return Ok(None);
        };
        order.status = parsed.as_str().to_owned();
        order.updated_at = ts;
        Ok(Some(order.clone()))
    }

    #[must_use]
    pub fn delete_order(&self, id: i32) -> bool {
        let mut inner = self.lock();
        if inner.orders.remove(&id).is_none() {
            return false;
        }
        inner.items.retain(|_, item| item.order_id != id);
        true
    }

    // -- order items --------------------------------------------------------

    /// No side effects: stock is not decremented and the order total is not
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Fails with `FailedPrecondition` when the order or product does not
    /// exist and `InvalidArgument` for unparseable prices.
    pub fn add_item(&self, req: pb::AddOrderItemRequest) -> Result<pb::OrderItem, Status> {
        let mut inner = self.lock();
        if !inner.orders.contains_key(&req.order_id) {
            return Err(Status::failed_precondition(format!(
                "order {} does not exist",
                req.order_id
            )));
        }
        if !inner.products.contains_key(&req.product_id) {
            return Err(Status::failed_precondition(format!(
                "product {} does not exist",
                req.product_id
            )));
        }
        check_decimal("unit_price", &req.unit_price)?;
        check_decimal("total_price", &req.total_price)?;
        let id = next(&mut inner.item_seq);
        let item = pb::OrderItem {
            id,
            order_id: req.order_id,
            product_id: req.product_id,
            quantity: req.quantity,
            unit_price: req.unit_price,
            total_price: req.total_price,
            created_at: now(),
        };
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    #[must_use]
    pub fn items_for_order(&self, order_id: i32) -> Vec<pb::OrderItem> {
        self.lock()
            .items
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn remove_item(&self, item_id: i32) -> bool {
        self.lock().items.remove(&item_id).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tonic::Code;

    use super::*;

    fn user_req(name: &str) -> pb::CreateUserRequest {
        pb::CreateUserRequest {
            username: name.to_owned(),
            email: format!("{name}@example.com"),
            password: "pw".to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            ..pb::CreateUserRequest::default()
        }
    }

    fn product_req(sku: &str) -> pb::CreateProductRequest {
        pb::CreateProductRequest {
            name: "Widget".to_owned(),
            description: "A widget".to_owned(),
            price: "9.99".to_owned(),
            category: "general".to_owned(),
            brand: "Acme".to_owned(),
            stock_quantity: 5,
            sku: sku.to_owned(),
            image_url: None,
            is_active: None,
        }
    }

    fn order_req(user_id: i32, number: &str) -> pb::CreateOrderRequest {
        pb::CreateOrderRequest {
            user_id,
            order_number: number.to_owned(),
            total_amount: "49.99".to_owned(),
            status: "pending".to_owned(),
            shipping_address: "1 Test St".to_owned(),
            billing_address: "1 Test St".to_owned(),
            payment_method: "credit_card".to_owned(),
        }
    }

    #[test]
    fn test_ids_start_at_one_and_increment() {
        let store = MockStore::default();
        let a = store.create_user(user_req("a")).unwrap();
        let b = store.create_user(user_req("b")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = MockStore::default();
        store.create_user(user_req("dup")).unwrap();
        let mut clash = user_req("dup");
        clash.email = "other@example.com".to_owned();
        let err = store.create_user(clash).unwrap_err();
        assert_eq!(err.code(), Code::AlreadyExists);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = MockStore::default();
        store.create_user(user_req("first")).unwrap();
        let mut clash = user_req("second");
        clash.email = "first@example.com".to_owned();
        let err = store.create_user(clash).unwrap_err();
        assert_eq!(err.code(), Code::AlreadyExists);
    }

    #[test]
    fn test_lookup_by_email_and_absence() {
        let store = MockStore::default();
        store.create_user(user_req("findme")).unwrap();
        assert!(store.get_user_by_email("findme@example.com").is_some());
        assert!(store.get_user_by_email("ghost@example.com").is_none());
        assert!(store.get_user(999).is_none());
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let store = MockStore::default();
        let created = store.create_user(user_req("merge")).unwrap();
        let updated = store
            .update_user(pb::UpdateUserRequest {
                id: created.id,
                city: Some("Springfield".to_owned()),
                ..pb::UpdateUserRequest::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated.city.as_deref(), Some("Springfield"));
        assert_eq!(updated.username, "merge");
        assert_eq!(updated.email, "merge@example.com");
    }

    #[test]
    fn test_update_missing_user_is_none() {
        let store = MockStore::default();
        let out = store
            .update_user(pb::UpdateUserRequest {
                id: 41,
                city: Some("Nowhere".to_owned()),
                ..pb::UpdateUserRequest::default()
            })
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_update_to_taken_username_rejected() {
        let store = MockStore::default();
        store.create_user(user_req("holder")).unwrap();
        let other = store.create_user(user_req("mover")).unwrap();
        let err = store
            .update_user(pb::UpdateUserRequest {
                id: other.id,
                username: Some("holder".to_owned()),
                ..pb::UpdateUserRequest::default()
            })
            .unwrap_err();
        assert_eq!(err.code(), Code::AlreadyExists);

        // Re-asserting your own value is not a conflict.
        let kept = store
            .update_user(pb::UpdateUserRequest {
                id: other.id,
                username: Some("mover".to_owned()),
                ..pb::UpdateUserRequest::default()
            })
            .unwrap();
        assert!(kept.is_some());
    }

    #[test]
    fn test_delete_user_cascades_orders_and_items() {
        let store = MockStore::default();
        let user = store.create_user(user_req("cascade")).unwrap();
        let product = store.create_product(product_req("SKU-C-1")).unwrap();
        let order = store.create_order(order_req(user.id, "ORD-C-1")).unwrap();
        store
            .add_item(pb::AddOrderItemRequest {
                order_id: order.id,
                product_id: product.id,
                quantity: 1,
                unit_price: "9.99".to_owned(),
                total_price: "9.99".to_owned(),
            })
            .unwrap();

        assert!(store.delete_user(user.id));
        assert!(store.get_order(order.id).is_none());
        assert!(store.items_for_order(order.id).is_empty());
        // The product is untouched.
        assert!(store.get_product(product.id).is_some());
    }

    #[test]
    fn test_delete_product_cascades_items_only() {
        let store = MockStore::default();
        let user = store.create_user(user_req("keeper")).unwrap();
        let product = store.create_product(product_req("SKU-K-1")).unwrap();
        let order = store.create_order(order_req(user.id, "ORD-K-1")).unwrap();
        store
            .add_item(pb::AddOrderItemRequest {
                order_id: order.id,
                product_id: product.id,
                quantity: 2,
                unit_price: "9.99".to_owned(),
                total_price: "19.98".to_owned(),
            })
            .unwrap();

        assert!(store.delete_product(product.id));
        assert!(store.items_for_order(order.id).is_empty());
        assert!(store.get_order(order.id).is_some());
    }

    #[test]
    fn test_order_requires_existing_user() {
        let store = MockStore::default();
        let err = store.create_order(order_req(99999, "ORD-X-1")).unwrap_err();
        assert_eq!(err.code(), Code::FailedPrecondition);
    }

    #[test]
    fn test_duplicate_order_number_rejected() {
        let store = MockStore::default();
        let user = store.create_user(user_req("orderer")).unwrap();
        store.create_order(order_req(user.id, "ORD-D-1")).unwrap();
        let err = store.create_order(order_req(user.id, "ORD-D-1")).unwrap_err();
        assert_eq!(err.code(), Code::AlreadyExists);
    }

    #[test]
    fn test_invalid_status_rejected_and_empty_defaults() {
        let store = MockStore::default();
        let user = store.create_user(user_req("status")).unwrap();

        let mut bad = order_req(user.id, "ORD-S-1");
        bad.status = "teleported".to_owned();
        assert_eq!(
            store.create_order(bad).unwrap_err().code(),
            Code::InvalidArgument
        );

        let mut empty = order_req(user.id, "ORD-S-2");
        empty.status = String::new();
        let order = store.create_order(empty).unwrap();
        assert_eq!(order.status, "pending");
    }

    #[test]
    fn test_status_transitions_are_unconditional() {
        let store = MockStore::default();
        let user = store.create_user(user_req("transitions")).unwrap();
        let order = store.create_order(order_req(user.id, "ORD-T-1")).unwrap();

        let delivered = store
            .update_order_status(order.id, "delivered")
            .unwrap()
            .unwrap();
        assert_eq!(delivered.status, "delivered");

        // Walking backwards is allowed.
        let reopened = store
            .update_order_status(order.id, "pending")
            .unwrap()
            .unwrap();
        assert_eq!(reopened.status, "pending");

        // Legacy spelling canonicalizes.
        let processing = store
            .update_order_status(order.id, "confirmed")
            .unwrap()
            .unwrap();
        assert_eq!(processing.status, "processing");
    }

    #[test]
    fn test_add_item_requires_order_and_product() {
        let store = MockStore::default();
        let user = store.create_user(user_req("itemless")).unwrap();
        let order = store.create_order(order_req(user.id, "ORD-I-1")).unwrap();

        let missing_product = pb::AddOrderItemRequest {
            order_id: order.id,
            product_id: 12345,
            quantity: 1,
            unit_price: "1.00".to_owned(),
            total_price: "1.00".to_owned(),
        };
        assert_eq!(
            store.add_item(missing_product).unwrap_err().code(),
            Code::FailedPrecondition
        );

        let missing_order = pb::AddOrderItemRequest {
            order_id: 12345,
            product_id: 1,
            quantity: 1,
            unit_price: "1.00".to_owned(),
            total_price: "1.00".to_owned(),
        };
        assert_eq!(
            store.add_item(missing_order).unwrap_err().code(),
            Code::FailedPrecondition
        );
    }

    #[test]
    fn test_remove_item() {
        let store = MockStore::default();
        let user = store.create_user(user_req("remover")).unwrap();
        let product = store.create_product(product_req("SKU-R-1")).unwrap();
        let order = store.create_order(order_req(user.id, "ORD-R-1")).unwrap();
        let item = store
            .add_item(pb::AddOrderItemRequest {
                order_id: order.id,
                product_id: product.id,
                quantity: 1,
                unit_price: "9.99".to_owned(),
                total_price: "9.99".to_owned(),
            })
            .unwrap();

        assert!(store.remove_item(item.id));
        assert!(!store.remove_item(item.id));
        assert!(store.items_for_order(order.id).is_empty());
    }

    #[test]
    fn test_pagination_window_and_total() {
        let store = MockStore::default();
        for i in 0..5 {
            store.create_product(product_req(&format!("SKU-P-{i}"))).unwrap();
        }

        let (page, total) = store.list_products(2, 2);
        assert_eq!(total, 5);
        let skus: Vec<&str> = page.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, ["SKU-P-2", "SKU-P-3"]);

        let (all, total) = store.list_products(1, 0);
        assert_eq!(all.len(), 5);
        assert_eq!(total, 5);

        let (past_end, _) = store.list_products(9, 2);
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_product_defaults_applied() {
        let store = MockStore::default();
        let product = store.create_product(product_req("SKU-DEF")).unwrap();
        assert_eq!(product.image_url, "");
        assert!(product.is_active);

        let explicit = store
            .create_product(pb::CreateProductRequest {
                image_url: Some("https://img.example/x.png".to_owned()),
                is_active: Some(false),
                ..product_req("SKU-EXP")
            })
            .unwrap();
        assert_eq!(explicit.image_url, "https://img.example/x.png");
        assert!(!explicit.is_active);
    }
}
