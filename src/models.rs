use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A named account embedded in its owning client's document. Accounts never
/// exist on their own; they live and die with the client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_name: String,
    pub balance: Decimal,
}

/// One client, one document. The id doubles as the partition key, so every
/// client is its own partition in the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmountRequest {
    pub amount: Decimal,
}

/// Balance range filter for the account listing endpoint. Both bounds are
/// exclusive; leaving both out returns every account.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AccountFilter {
    pub amount_greater_than: Option<Decimal>,
    pub amount_less_than: Option<Decimal>,
}

impl AccountFilter {
    pub fn is_unbounded(&self) -> bool {
        self.amount_greater_than.is_none() && self.amount_less_than.is_none()
    }
}
