use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use dinetap_api::domain::repository::{
    AccountRepository, FoodItemChanges, FoodItemRepository, MailSender, OtpRepository,
    QrEncoder, RestaurantChanges, RestaurantRepository, TableRepository,
};
use dinetap_api::domain::types::{Account, DiningTable, FoodItem, OneTimeCode, Restaurant};
use dinetap_api::error::ApiError;
use dinetap_api::usecase::otp::OtpGate;
use dinetap_domain::category::FoodCategory;
use dinetap_domain::role::Role;

pub const TEST_OTP_SECRET: &str = "test-otp-secret";

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_account(role: Role) -> Account {
    let id = Uuid::new_v4();
    let now = Utc::now();
    Account {
        id,
        first_name: "Asha".into(),
        last_name: "Rao".into(),
        email: format!("{id}@example.com"),
        phone: "+919812345678".into(),
        role,
        password_hash: None,
        deleted: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_restaurant(owner_id: Uuid) -> Restaurant {
    let now = Utc::now();
    Restaurant {
        id: Uuid::new_v4(),
        name: "Karavalli".into(),
        address1: "66 Residency Rd".into(),
        address2: None,
        city: "Bengaluru".into(),
        state: "Karnataka".into(),
        pincode: 560_025,
        gstin: None,
        restrict: false,
        deleted: false,
        owner_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_food_item(restaurant_id: Uuid, title: &str) -> FoodItem {
    let now = Utc::now();
    FoodItem {
        id: Uuid::new_v4(),
        restaurant_id,
        title: title.into(),
        description: None,
        price: 24_500,
        image: None,
        enabled: true,
        veg: false,
        category: FoodCategory::Mains,
        deleted: false,
        created_at: now,
        updated_at: now,
    }
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ApiError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create(&self, account: &Account) -> Result<(), ApiError> {
        self.accounts.lock().unwrap().push(account.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            if let Some(first_name) = first_name {
                account.first_name = first_name.to_owned();
            }
            if let Some(last_name) = last_name {
                account.last_name = last_name.to_owned();
            }
            if let Some(phone) = phone {
                account.phone = phone.to_owned();
            }
            account.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.deleted = true;
        }
        Ok(())
    }
}

// ── MockRestaurantRepo ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockRestaurantRepo {
    pub restaurants: Arc<Mutex<Vec<Restaurant>>>,
    pub managers: Arc<Mutex<HashMap<Uuid, Vec<Uuid>>>>,
}

impl MockRestaurantRepo {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self {
            restaurants: Arc::new(Mutex::new(restaurants)),
            managers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn with_managers(self, restaurant_id: Uuid, account_ids: Vec<Uuid>) -> Self {
        self.managers
            .lock()
            .unwrap()
            .insert(restaurant_id, account_ids);
        self
    }
}

impl RestaurantRepository for MockRestaurantRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ApiError> {
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Restaurant>, ApiError> {
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.deleted)
            .cloned()
            .collect())
    }

    async fn create(&self, restaurant: &Restaurant) -> Result<(), ApiError> {
        self.restaurants.lock().unwrap().push(restaurant.clone());
        Ok(())
    }

    async fn update_fields(&self, id: Uuid, changes: &RestaurantChanges) -> Result<(), ApiError> {
        let mut restaurants = self.restaurants.lock().unwrap();
        if let Some(restaurant) = restaurants.iter_mut().find(|r| r.id == id) {
            if let Some(ref name) = changes.name {
                restaurant.name = name.clone();
            }
            if let Some(ref address1) = changes.address1 {
                restaurant.address1 = address1.clone();
            }
            if let Some(ref address2) = changes.address2 {
                restaurant.address2 = Some(address2.clone());
            }
            if let Some(ref city) = changes.city {
                restaurant.city = city.clone();
            }
            if let Some(ref state) = changes.state {
                restaurant.state = state.clone();
            }
            if let Some(pincode) = changes.pincode {
                restaurant.pincode = pincode;
            }
            if let Some(ref gstin) = changes.gstin {
                restaurant.gstin = Some(gstin.clone());
            }
            if let Some(restrict) = changes.restrict {
                restaurant.restrict = restrict;
            }
            restaurant.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        let mut restaurants = self.restaurants.lock().unwrap();
        if let Some(restaurant) = restaurants.iter_mut().find(|r| r.id == id) {
            restaurant.deleted = true;
        }
        Ok(())
    }

    async fn managers(&self, restaurant_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        Ok(self
            .managers
            .lock()
            .unwrap()
            .get(&restaurant_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_manager(&self, restaurant_id: Uuid, account_id: Uuid) -> Result<(), ApiError> {
        let mut managers = self.managers.lock().unwrap();
        let set = managers.entry(restaurant_id).or_default();
        if !set.contains(&account_id) {
            set.push(account_id);
        }
        Ok(())
    }
}

// ── MockFoodItemRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockFoodItemRepo {
    pub items: Arc<Mutex<Vec<FoodItem>>>,
}

impl MockFoodItemRepo {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl FoodItemRepository for MockFoodItemRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FoodItem>, ApiError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_active_for_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<FoodItem>, ApiError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.restaurant_id == restaurant_id && !i.deleted && i.enabled)
            .cloned()
            .collect())
    }

    async fn find_active_by_title(
        &self,
        restaurant_id: Uuid,
        title: &str,
    ) -> Result<Option<FoodItem>, ApiError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.restaurant_id == restaurant_id && i.title == title && !i.deleted)
            .cloned())
    }

    async fn create(&self, item: &FoodItem) -> Result<(), ApiError> {
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn update_fields(&self, id: Uuid, changes: &FoodItemChanges) -> Result<(), ApiError> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            if let Some(ref title) = changes.title {
                item.title = title.clone();
            }
            if let Some(ref description) = changes.description {
                item.description = Some(description.clone());
            }
            if let Some(price) = changes.price {
                item.price = price;
            }
            if let Some(ref image) = changes.image {
                item.image = Some(image.clone());
            }
            if let Some(enabled) = changes.enabled {
                item.enabled = enabled;
            }
            if let Some(veg) = changes.veg {
                item.veg = veg;
            }
            if let Some(category) = changes.category {
                item.category = category;
            }
            item.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            item.deleted = true;
        }
        Ok(())
    }
}

// ── MockTableRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTableRepo {
    pub tables: Arc<Mutex<Vec<DiningTable>>>,
}

impl MockTableRepo {
    pub fn empty() -> Self {
        Self {
            tables: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl TableRepository for MockTableRepo {
    async fn replace_for_restaurant(
        &self,
        restaurant_id: Uuid,
        new_tables: &[DiningTable],
    ) -> Result<(), ApiError> {
        let mut tables = self.tables.lock().unwrap();
        tables.retain(|t| t.restaurant_id != restaurant_id);
        tables.extend_from_slice(new_tables);
        Ok(())
    }

    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
        table_number: Option<i32>,
    ) -> Result<Vec<DiningTable>, ApiError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .iter()
            .filter(|t| {
                t.restaurant_id == restaurant_id
                    && table_number.is_none_or(|n| t.table_number == n)
            })
            .cloned()
            .collect())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpRepo {
    pub codes: Arc<Mutex<Vec<OneTimeCode>>>,
}

impl MockOtpRepo {
    pub fn new(codes: Vec<OneTimeCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl OtpRepository for MockOtpRepo {
    async fn create(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_latest(&self, email: &str) -> Result<Option<OneTimeCode>, ApiError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.email == email)
            .next_back()
            .cloned())
    }

    async fn delete_for_email(&self, email: &str) -> Result<(), ApiError> {
        self.codes.lock().unwrap().retain(|c| c.email != email);
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    /// Digits-only code carried in the most recently sent mail body.
    pub fn last_code(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let body = &sent.last()?.body;
        let code: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
        // Body mentions "15 minutes"; the code is the leading 6-digit run.
        Some(code.chars().take(6).collect())
    }
}

impl MailSender for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::Upstream("smtp unavailable".into()));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}

// ── Gate + QR helpers ────────────────────────────────────────────────────────

pub fn test_gate(otps: MockOtpRepo, mailer: MockMailer) -> OtpGate<MockOtpRepo, MockMailer> {
    OtpGate {
        otps,
        mailer,
        secret: TEST_OTP_SECRET.to_owned(),
        consume_on_verify: false,
    }
}

#[derive(Clone)]
pub struct StaticQrEncoder;

impl QrEncoder for StaticQrEncoder {
    fn encode(&self, restaurant_id: Uuid, table_number: i32) -> String {
        format!("https://test.local/restaurant/{restaurant_id}/{table_number}")
    }
}
