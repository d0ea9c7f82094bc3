use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[sqlx(type_name = "text")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub description: String,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Invoice ready to be inserted. Ids and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub user_id: Uuid,
    pub amount: f64,
    pub description: String,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
}

/// Fields to overwrite on update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceChanges {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Applies the present fields to `invoice` and bumps `updated_at`.
    pub fn apply_to(&self, invoice: &mut Invoice, now: DateTime<Utc>) {
        if let Some(amount) = self.amount {
            invoice.amount = amount;
        }
        if let Some(description) = &self.description {
            invoice.description = description.clone();
        }
        if let Some(status) = self.status {
            invoice.status = status;
        }
        invoice.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(deserialize_with = "amount::required")]
    pub amount: f64,
    pub description: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    #[serde(default, deserialize_with = "amount::optional")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

/// Form inputs post amounts as strings ("100"), so both shapes are accepted.
mod amount {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    fn parse<E: serde::de::Error>(value: NumberOrString) -> Result<f64, E> {
        match value {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("amount must be a number, got {:?}", s))),
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        parse(NumberOrString::deserialize(deserializer)?)
    }

    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(value) => parse::<D::Error>(value).map(Some),
            None => Ok(None),
        }
    }
}
