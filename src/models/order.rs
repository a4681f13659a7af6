//! Order record
//!
//! The value cached and persisted by the service. JSON field names follow the
//! wire format of the upstream order feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Complete order: delivery details, payment and purchased items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_uid: String,
    pub track_number: String,
    pub entry: String,
    pub delivery: Delivery,
    pub payment: Payment,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub internal_signature: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub delivery_service: String,
    #[serde(default)]
    pub shardkey: String,
    #[serde(default)]
    pub sm_id: i64,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub oof_shard: String,
}

/// Recipient contact data and shipping address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub name: String,
    pub phone: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub region: String,
    pub email: String,
}

/// Financial side of the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub transaction: String,
    #[serde(default)]
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: i64,
    pub payment_dt: i64,
    pub bank: String,
    #[serde(default)]
    pub delivery_cost: i64,
    pub goods_total: i64,
    #[serde(default)]
    pub custom_fee: i64,
}

/// Single line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub chrt_id: i64,
    pub track_number: String,
    pub price: i64,
    pub rid: String,
    pub name: String,
    #[serde(default)]
    pub sale: i64,
    #[serde(default)]
    pub size: String,
    pub total_price: i64,
    pub nm_id: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub status: i64,
}

impl Order {
    // == Validate ==
    /// Checks structural and business constraints.
    ///
    /// Returns the first violation found. Fields are checked top to bottom:
    /// order header, delivery, payment, then each item.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("order_uid", &self.order_uid)?;
        required("track_number", &self.track_number)?;
        required("entry", &self.entry)?;
        self.delivery.validate()?;
        self.payment.validate()?;

        if self.items.is_empty() {
            return Err(ValidationError::new(
                "items",
                "order must contain at least one item",
            ));
        }
        for (idx, item) in self.items.iter().enumerate() {
            item.validate(idx)?;
        }
        Ok(())
    }
}

impl Delivery {
    fn validate(&self) -> Result<(), ValidationError> {
        required("delivery.name", &self.name)?;
        if self.name.trim().chars().count() < 2 {
            return Err(ValidationError::new(
                "delivery.name",
                "must be at least 2 characters",
            ));
        }
        required("delivery.phone", &self.phone)?;
        if !is_e164(&self.phone) {
            return Err(ValidationError::new(
                "delivery.phone",
                "must be an E.164 phone number",
            ));
        }
        required("delivery.zip", &self.zip)?;
        if !self.zip.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("delivery.zip", "must be numeric"));
        }
        required("delivery.city", &self.city)?;
        required("delivery.address", &self.address)?;
        required("delivery.region", &self.region)?;
        required("delivery.email", &self.email)?;
        if !is_email(&self.email) {
            return Err(ValidationError::new(
                "delivery.email",
                "must be a valid email address",
            ));
        }
        Ok(())
    }
}

impl Payment {
    fn validate(&self) -> Result<(), ValidationError> {
        required("payment.transaction", &self.transaction)?;
        required("payment.request_id", &self.request_id)?;
        if self.currency.chars().count() != 3 {
            return Err(ValidationError::new(
                "payment.currency",
                "must be a 3 letter currency code",
            ));
        }
        required("payment.provider", &self.provider)?;
        positive("payment.amount", self.amount)?;
        if self.payment_dt == 0 {
            return Err(ValidationError::new("payment.payment_dt", "is required"));
        }
        required("payment.bank", &self.bank)?;
        non_negative("payment.delivery_cost", self.delivery_cost)?;
        positive("payment.goods_total", self.goods_total)?;
        non_negative("payment.custom_fee", self.custom_fee)?;
        Ok(())
    }
}

impl Item {
    fn validate(&self, idx: usize) -> Result<(), ValidationError> {
        let field = |name: &str| format!("items[{}].{}", idx, name);

        if self.chrt_id == 0 {
            return Err(ValidationError::new(field("chrt_id"), "is required"));
        }
        required(&field("track_number"), &self.track_number)?;
        positive(&field("price"), self.price)?;
        required(&field("rid"), &self.rid)?;
        required(&field("name"), &self.name)?;
        positive(&field("total_price"), self.total_price)?;
        if self.nm_id == 0 {
            return Err(ValidationError::new(field("nm_id"), "is required"));
        }
        Ok(())
    }
}

// == Field Checks ==
fn required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

fn positive(field: &str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }
    Ok(())
}

fn non_negative(field: &str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(field, "must not be negative"));
    }
    Ok(())
}

/// `+` followed by 2..=15 digits, no leading zero.
fn is_e164(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    (2..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::order;
    use super::*;

    #[test]
    fn test_valid_order_passes() {
        assert!(order("A1").validate().is_ok());
    }

    #[test]
    fn test_order_deserialize_wire_format() {
        let json = serde_json::to_string(&order("b563feb7b2b84b6test")).unwrap();
        assert!(json.contains("\"order_uid\":\"b563feb7b2b84b6test\""));
        assert!(json.contains("\"shardkey\":\"9\""));

        let decoded: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, order("b563feb7b2b84b6test"));
    }

    #[test]
    fn test_missing_uid_rejected() {
        let mut o = order("A1");
        o.order_uid = "  ".to_string();
        let err = o.validate().unwrap_err();
        assert_eq!(err.field, "order_uid");
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut o = order("A1");
        o.items.clear();
        assert_eq!(o.validate().unwrap_err().field, "items");
    }

    #[test]
    fn test_item_bounds_rejected() {
        let mut o = order("A1");
        o.items[0].price = 0;
        assert_eq!(o.validate().unwrap_err().field, "items[0].price");

        let mut o = order("A1");
        o.items.push(o.items[0].clone());
        o.items[1].nm_id = 0;
        assert_eq!(o.validate().unwrap_err().field, "items[1].nm_id");
    }

    #[test]
    fn test_payment_bounds_rejected() {
        let mut o = order("A1");
        o.payment.amount = -5;
        assert_eq!(o.validate().unwrap_err().field, "payment.amount");

        let mut o = order("A1");
        o.payment.currency = "RUBL".to_string();
        assert_eq!(o.validate().unwrap_err().field, "payment.currency");

        let mut o = order("A1");
        o.payment.delivery_cost = -1;
        assert_eq!(o.validate().unwrap_err().field, "payment.delivery_cost");
    }

    #[test]
    fn test_delivery_formats() {
        let mut o = order("A1");
        o.delivery.phone = "89001234567".to_string();
        assert_eq!(o.validate().unwrap_err().field, "delivery.phone");

        let mut o = order("A1");
        o.delivery.zip = "26-398".to_string();
        assert_eq!(o.validate().unwrap_err().field, "delivery.zip");

        let mut o = order("A1");
        o.delivery.email = "test@localhost".to_string();
        assert_eq!(o.validate().unwrap_err().field, "delivery.email");

        let mut o = order("A1");
        o.delivery.name = "T".to_string();
        assert_eq!(o.validate().unwrap_err().field, "delivery.name");
    }

    #[test]
    fn test_phone_and_email_helpers() {
        assert!(is_e164("+79001234567"));
        assert!(!is_e164("+0123"));
        assert!(!is_e164("+1"));
        assert!(!is_e164("+1234567890123456"));
        assert!(is_email("a.b@mail.example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a@b@c.com"));
        assert!(!is_email("a b@c.com"));
    }
}
