use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::accounts::Account;
use crate::signing::{source::register_source, ActionSource};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub(crate) struct RegisterDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub nickname: String,
}

impl ActionSource for RegisterDto {
    fn signing_source(&self) -> String {
        register_source(&self.email, &self.nickname, &self.password)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountDto {
    pub id: u64,
    pub email: String,
    pub nickname: String,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            nickname: account.nickname,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: AccountDto,
}
