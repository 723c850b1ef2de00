use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::purchase::GooglePlayPurchase;
use crate::domain::repositories::GooglePlayPurchaseRepository;

#[derive(sqlx::FromRow)]
struct GooglePlayPurchaseRow {
    order_id: String,
    product_id: String,
    purchase_token: String,
    purchase_state: Option<i32>,
    consumption_state: Option<i32>,
    acknowledgement_state: Option<i32>,
    developer_payload: Option<String>,
    kind: Option<String>,
    purchase_time_millis: Option<String>,
    owner_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GooglePlayPurchaseRow> for GooglePlayPurchase {
    fn from(r: GooglePlayPurchaseRow) -> Self {
        GooglePlayPurchase {
            order_id: r.order_id,
            product_id: r.product_id,
            purchase_token: r.purchase_token,
            purchase_state: r.purchase_state,
            consumption_state: r.consumption_state,
            acknowledgement_state: r.acknowledgement_state,
            developer_payload: r.developer_payload,
            kind: r.kind,
            purchase_time_millis: r.purchase_time_millis,
            owner: r.owner_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL implementation of GooglePlayPurchaseRepository
pub struct PostgresGooglePlayPurchaseRepository {
    pool: PgPool,
}

impl PostgresGooglePlayPurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GooglePlayPurchaseRepository for PostgresGooglePlayPurchaseRepository {
    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<GooglePlayPurchase>, String> {
        let row = sqlx::query_as::<_, GooglePlayPurchaseRow>(
            r#"
            SELECT
                order_id, product_id, purchase_token,
                purchase_state, consumption_state, acknowledgement_state,
                developer_payload, kind, purchase_time_millis,
                owner_id, created_at, updated_at
            FROM google_play_purchases
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find google play purchase: {}", e))?;

        Ok(row.map(GooglePlayPurchase::from))
    }

    async fn create(&self, purchase: &GooglePlayPurchase) -> Result<bool, String> {
        let result = sqlx::query(
            r#"
            INSERT INTO google_play_purchases (
                order_id, product_id, purchase_token,
                purchase_state, consumption_state, acknowledgement_state,
                developer_payload, kind, purchase_time_millis,
                owner_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(&purchase.order_id)
        .bind(&purchase.product_id)
        .bind(&purchase.purchase_token)
        .bind(purchase.purchase_state)
        .bind(purchase.consumption_state)
        .bind(purchase.acknowledgement_state)
        .bind(&purchase.developer_payload)
        .bind(&purchase.kind)
        .bind(&purchase.purchase_time_millis)
        .bind(purchase.owner)
        .bind(purchase.created_at)
        .bind(purchase.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create google play purchase: {}", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn save(&self, purchase: &GooglePlayPurchase) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO google_play_purchases (
                order_id, product_id, purchase_token,
                purchase_state, consumption_state, acknowledgement_state,
                developer_payload, kind, purchase_time_millis,
                owner_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (order_id) DO UPDATE SET
                product_id = EXCLUDED.product_id,
                purchase_token = EXCLUDED.purchase_token,
                purchase_state = EXCLUDED.purchase_state,
                consumption_state = EXCLUDED.consumption_state,
                acknowledgement_state = EXCLUDED.acknowledgement_state,
                developer_payload = EXCLUDED.developer_payload,
                kind = EXCLUDED.kind,
                purchase_time_millis = EXCLUDED.purchase_time_millis,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&purchase.order_id)
        .bind(&purchase.product_id)
        .bind(&purchase.purchase_token)
        .bind(purchase.purchase_state)
        .bind(purchase.consumption_state)
        .bind(purchase.acknowledgement_state)
        .bind(&purchase.developer_payload)
        .bind(&purchase.kind)
        .bind(&purchase.purchase_time_millis)
        .bind(purchase.owner)
        .bind(purchase.created_at)
        .bind(purchase.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save google play purchase: {}", e))?;

        Ok(())
    }
}
