use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::validation::{is_min, is_not_empty, Validate};

/// In-app purchase made through Google Play
///
/// # Invariants
/// - `order_id` is the natural key and cannot be empty
/// - `product_id` and `purchase_token` cannot be empty
/// - State codes are non-negative when present
/// - Only `owner` may read or update the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlayPurchase {
    pub order_id: String,
    pub product_id: String,
    pub purchase_token: String,
    pub purchase_state: Option<i32>,
    pub consumption_state: Option<i32>,
    pub acknowledgement_state: Option<i32>,
    pub developer_payload: Option<String>,
    pub kind: Option<String>,
    pub purchase_time_millis: Option<String>,
    pub owner: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GooglePlayPurchase {
    /// Builds an unsaved purchase from client input
    pub fn new(input: NewGooglePlayPurchase, owner: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            order_id: input.order_id,
            product_id: input.product_id,
            purchase_token: input.purchase_token,
            purchase_state: input.purchase_state,
            consumption_state: input.consumption_state,
            acknowledgement_state: input.acknowledgement_state,
            developer_payload: input.developer_payload,
            kind: input.kind,
            purchase_time_millis: input.purchase_time_millis,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true when `user_id` owns this purchase
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == Some(user_id)
    }

    /// Applies an update, returning the merged record
    ///
    /// The order id and owner are never changed by an update.
    pub fn merge(&self, update: &GooglePlayPurchaseUpdate) -> GooglePlayPurchase {
        let mut merged = self.clone();

        if let Some(product_id) = &update.product_id {
            merged.product_id = product_id.clone();
        }
        if let Some(purchase_token) = &update.purchase_token {
            merged.purchase_token = purchase_token.clone();
        }
        if update.purchase_state.is_some() {
            merged.purchase_state = update.purchase_state;
        }
        if update.consumption_state.is_some() {
            merged.consumption_state = update.consumption_state;
        }
        if update.acknowledgement_state.is_some() {
            merged.acknowledgement_state = update.acknowledgement_state;
        }
        if update.developer_payload.is_some() {
            merged.developer_payload = update.developer_payload.clone();
        }
        if update.kind.is_some() {
            merged.kind = update.kind.clone();
        }
        if update.purchase_time_millis.is_some() {
            merged.purchase_time_millis = update.purchase_time_millis.clone();
        }

        merged.updated_at = Utc::now();
        merged
    }
}

impl Validate for GooglePlayPurchase {
    fn validate(&self) -> DomainResult<()> {
        is_not_empty("orderId", &self.order_id)?;
        is_not_empty("productId", &self.product_id)?;
        is_not_empty("purchaseToken", &self.purchase_token)?;

        let states = [
            ("purchaseState", self.purchase_state),
            ("consumptionState", self.consumption_state),
            ("acknowledgementState", self.acknowledgement_state),
        ];
        for (field, state) in states {
            if let Some(state) = state {
                is_min(field, i64::from(state), 0)?;
            }
        }

        Ok(())
    }
}

/// Client input for recording a purchase
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGooglePlayPurchase {
    pub order_id: String,
    pub product_id: String,
    pub purchase_token: String,
    #[serde(default)]
    pub purchase_state: Option<i32>,
    #[serde(default)]
    pub consumption_state: Option<i32>,
    #[serde(default)]
    pub acknowledgement_state: Option<i32>,
    #[serde(default)]
    pub developer_payload: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub purchase_time_millis: Option<String>,
}

/// Partial update of a purchase, addressed by `order_id`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlayPurchaseUpdate {
    pub order_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub purchase_token: Option<String>,
    #[serde(default)]
    pub purchase_state: Option<i32>,
    #[serde(default)]
    pub consumption_state: Option<i32>,
    #[serde(default)]
    pub acknowledgement_state: Option<i32>,
    #[serde(default)]
    pub developer_payload: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub purchase_time_millis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    fn input() -> NewGooglePlayPurchase {
        NewGooglePlayPurchase {
            order_id: "GPA.3345-1234-5678-90123".to_string(),
            product_id: "podcast_premium_yearly".to_string(),
            purchase_token: "token-abc".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_purchase_passes() {
        let purchase = GooglePlayPurchase::new(input(), Some(Uuid::new_v4()));
        assert!(purchase.validate().is_ok());
    }

    #[test]
    fn first_violation_wins() {
        let purchase = GooglePlayPurchase::new(
            NewGooglePlayPurchase {
                order_id: String::new(),
                product_id: String::new(),
                ..input()
            },
            None,
        );

        assert_eq!(
            purchase.validate(),
            Err(DomainError::BadRequest("orderId should not be empty".to_string()))
        );
    }

    #[test]
    fn negative_state_rejected() {
        let purchase = GooglePlayPurchase::new(
            NewGooglePlayPurchase {
                acknowledgement_state: Some(-1),
                ..input()
            },
            None,
        );

        assert!(purchase.validate().is_err());
    }

    #[test]
    fn ownership() {
        let owner = Uuid::new_v4();
        let purchase = GooglePlayPurchase::new(input(), Some(owner));

        assert!(purchase.is_owned_by(owner));
        assert!(!purchase.is_owned_by(Uuid::new_v4()));
        assert!(!GooglePlayPurchase::new(input(), None).is_owned_by(owner));
    }

    #[test]
    fn merge_keeps_key_and_owner() {
        let owner = Uuid::new_v4();
        let purchase = GooglePlayPurchase::new(input(), Some(owner));

        let merged = purchase.merge(&GooglePlayPurchaseUpdate {
            order_id: purchase.order_id.clone(),
            purchase_state: Some(1),
            acknowledgement_state: Some(1),
            ..Default::default()
        });

        assert_eq!(merged.order_id, purchase.order_id);
        assert_eq!(merged.owner, Some(owner));
        assert_eq!(merged.purchase_state, Some(1));
        assert_eq!(merged.acknowledgement_state, Some(1));
        assert_eq!(merged.product_id, purchase.product_id);
        assert_eq!(purchase.purchase_state, None);
    }
}
