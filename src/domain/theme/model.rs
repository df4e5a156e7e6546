//! Theme domain entity

use chrono::NaiveTime;
use validator::Validate;

use crate::domain::office::{Office, OfficeId};
use crate::shared::types::DomainResult;
use crate::shared::validations::{self, validate_not_blank};

pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 6;
pub const DEFAULT_CAPACITY: i32 = 2;

/// Store-assigned theme identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeId(pub i32);

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to create a [`Theme`]. Optional settings start at
/// their defaults: no discount, unavailable, capacity 2.
#[derive(Debug, Clone, Validate)]
pub struct NewTheme {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "name must not exceed 100 characters")
    )]
    pub name: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i32,
    pub open_time: NaiveTime,
    #[validate(range(min = 0, message = "discount amount must not be negative"))]
    pub discount_amount: i32,
    pub is_available: bool,
    #[validate(range(min = 1, max = 6, message = "capacity must be between 1 and 6"))]
    pub capacity: i32,
}

impl NewTheme {
    pub fn new(name: impl Into<String>, price: i32, open_time: NaiveTime) -> Self {
        Self {
            name: name.into(),
            price,
            open_time,
            discount_amount: 0,
            is_available: false,
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn discount_amount(mut self, discount_amount: i32) -> Self {
        self.discount_amount = discount_amount;
        self
    }

    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    pub fn capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Escape-room theme.
///
/// The office reference is copied from the office at creation and cannot be
/// reassigned. Whether that office actually exists is checked by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    id: Option<ThemeId>,
    name: String,
    price: i32,
    open_time: NaiveTime,
    discount_amount: i32,
    is_available: bool,
    capacity: i32,
    office_id: Option<OfficeId>,
}

impl Theme {
    pub fn new(new: NewTheme, office: &Office) -> DomainResult<Self> {
        new.validate()?;

        Ok(Self {
            id: None,
            name: new.name,
            price: new.price,
            open_time: new.open_time,
            discount_amount: new.discount_amount,
            is_available: new.is_available,
            capacity: new.capacity,
            office_id: office.id(),
        })
    }

    /// Rebuild a theme from a stored row without re-running validation.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: ThemeId,
        name: String,
        price: i32,
        open_time: NaiveTime,
        discount_amount: i32,
        is_available: bool,
        capacity: i32,
        office_id: OfficeId,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            price,
            open_time,
            discount_amount,
            is_available,
            capacity,
            office_id: Some(office_id),
        }
    }

    pub(crate) fn persisted(mut self, id: ThemeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<ThemeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn open_time(&self) -> NaiveTime {
        self.open_time
    }

    pub fn discount_amount(&self) -> i32 {
        self.discount_amount
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// `None` when the office had not been saved yet at creation.
    pub fn office_id(&self) -> Option<OfficeId> {
        self.office_id
    }

    /// Price after discount. Negative when the discount exceeds the price.
    pub fn final_entrance_fee(&self) -> i32 {
        self.price - self.discount_amount
    }

    pub fn change_name(&mut self, name: &str) -> DomainResult<()> {
        validations::validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    pub fn change_price(&mut self, price: i32) -> DomainResult<()> {
        validations::non_negative("price", price)?;
        self.price = price;
        Ok(())
    }

    pub fn change_open_time(&mut self, open_time: impl Into<Option<NaiveTime>>) -> DomainResult<()> {
        self.open_time = validations::require("open time", open_time.into())?;
        Ok(())
    }

    pub fn change_discount_amount(&mut self, discount_amount: i32) -> DomainResult<()> {
        validations::non_negative("discount amount", discount_amount)?;
        self.discount_amount = discount_amount;
        Ok(())
    }

    pub fn change_is_available(&mut self, is_available: impl Into<Option<bool>>) -> DomainResult<()> {
        self.is_available = validations::require("availability", is_available.into())?;
        Ok(())
    }

    pub fn change_capacity(&mut self, capacity: i32) -> DomainResult<()> {
        validations::within("capacity", capacity, MIN_CAPACITY, MAX_CAPACITY)?;
        self.capacity = capacity;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::office::NewOffice;
    use crate::shared::types::AuditStamp;

    const THEME_NAME: &str = "비밀의 방";
    const PRICE: i32 = 10_000;
    const DISCOUNT_AMOUNT: i32 = 500;
    const CAPACITY: i32 = 4;

    fn open_time() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn saved_office() -> Office {
        Office::new(NewOffice {
            name: "강남점".into(),
            ..NewOffice::default()
        })
        .unwrap()
        .persisted(OfficeId(1), AuditStamp::now())
    }

    fn new_theme() -> NewTheme {
        NewTheme::new(THEME_NAME, PRICE, open_time())
            .discount_amount(DISCOUNT_AMOUNT)
            .available(true)
            .capacity(CAPACITY)
    }

    fn sample_theme() -> Theme {
        Theme::new(new_theme(), &saved_office()).unwrap()
    }

    #[test]
    fn create_theme_with_saved_office() {
        let theme = sample_theme();
        assert_eq!(theme.id(), None);
        assert_eq!(theme.name(), THEME_NAME);
        assert_eq!(theme.final_entrance_fee(), PRICE - DISCOUNT_AMOUNT);
        assert_eq!(theme.capacity(), CAPACITY);
        assert_eq!(theme.open_time(), open_time());
        assert!(theme.is_available());
        assert_eq!(theme.office_id(), Some(OfficeId(1)));
    }

    #[test]
    fn create_theme_uses_defaults() {
        let theme = Theme::new(NewTheme::new(THEME_NAME, PRICE, open_time()), &saved_office())
            .unwrap();
        assert_eq!(theme.discount_amount(), 0);
        assert!(!theme.is_available());
        assert_eq!(theme.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn create_theme_with_unsaved_office_has_no_office_id() {
        let office = Office::new(NewOffice {
            name: "신촌점".into(),
            ..NewOffice::default()
        })
        .unwrap();
        let theme = Theme::new(new_theme(), &office).unwrap();
        assert_eq!(theme.office_id(), None);
    }

    #[test]
    fn create_theme_rejects_invalid_fields() {
        let office = saved_office();
        let cases = [
            ("blank name", NewTheme { name: " ".into(), ..new_theme() }),
            ("long name", NewTheme { name: "a".repeat(101), ..new_theme() }),
            ("negative price", NewTheme { price: -1, ..new_theme() }),
            ("negative discount", new_theme().discount_amount(-1)),
            ("zero capacity", new_theme().capacity(0)),
            ("capacity over 6", new_theme().capacity(7)),
        ];

        for (case, new) in cases {
            assert!(Theme::new(new, &office).is_err(), "{case} was accepted");
        }
    }

    #[test]
    fn final_entrance_fee_subtracts_discount() {
        assert_eq!(sample_theme().final_entrance_fee(), 9_500);
    }

    #[test]
    fn final_entrance_fee_may_go_negative() {
        let mut theme = sample_theme();
        theme.change_discount_amount(PRICE + 1).unwrap();
        assert_eq!(theme.final_entrance_fee(), -1);
    }

    #[test]
    fn change_name_rules() {
        let mut theme = sample_theme();
        for invalid in [String::new(), " ".into(), "a".repeat(101)] {
            assert!(theme.change_name(&invalid).is_err());
        }
        assert_eq!(theme.name(), THEME_NAME);

        theme.change_name("새 테마").unwrap();
        assert_eq!(theme.name(), "새 테마");

        let longest = "a".repeat(100);
        theme.change_name(&longest).unwrap();
        assert_eq!(theme.name(), longest);
    }

    #[test]
    fn change_price_rules() {
        let mut theme = sample_theme();
        let err = theme.change_price(-1).unwrap_err();
        assert_eq!(err.reason(), "price must not be negative");
        assert_eq!(theme.price(), PRICE);

        for price in [0, 1, 50_000] {
            theme.change_price(price).unwrap();
            assert_eq!(theme.price(), price);
        }
    }

    #[test]
    fn change_open_time_rules() {
        let mut theme = sample_theme();
        assert!(theme.change_open_time(None).is_err());
        assert_eq!(theme.open_time(), open_time());

        let later = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        theme.change_open_time(later).unwrap();
        assert_eq!(theme.open_time(), later);
    }

    #[test]
    fn change_discount_amount_rules() {
        let mut theme = sample_theme();
        assert!(theme.change_discount_amount(-100).is_err());
        assert_eq!(theme.discount_amount(), DISCOUNT_AMOUNT);

        theme.change_discount_amount(0).unwrap();
        assert_eq!(theme.discount_amount(), 0);
    }

    #[test]
    fn change_is_available_rules() {
        let mut theme = sample_theme();
        let err = theme.change_is_available(None).unwrap_err();
        assert_eq!(err.reason(), "availability must not be null");
        assert!(theme.is_available());

        theme.change_is_available(false).unwrap();
        assert!(!theme.is_available());
        theme.change_is_available(Some(true)).unwrap();
        assert!(theme.is_available());
    }

    #[test]
    fn change_capacity_boundaries() {
        let cases = [(-1, false), (0, false), (1, true), (6, true), (7, false)];
        for (capacity, should_succeed) in cases {
            let mut theme = sample_theme();
            let result = theme.change_capacity(capacity);
            if should_succeed {
                assert!(result.is_ok(), "capacity {capacity} rejected");
                assert_eq!(theme.capacity(), capacity);
            } else {
                assert!(result.is_err(), "capacity {capacity} accepted");
                assert_eq!(theme.capacity(), CAPACITY);
            }
        }
    }
}
