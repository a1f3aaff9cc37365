use serde::{Deserialize, Serialize};

/// Required actions a user can be asked to perform
///
/// Servers register further actions (`webauthn-register`, `UPDATE_EMAIL`,
/// `delete_account`, custom providers); those come through as [`Other`](Self::Other).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredActionAlias {
    VerifyEmail,
    UpdateProfile,
    #[serde(rename = "CONFIGURE_TOTP")]
    ConfigureTotp,
    UpdatePassword,
    #[serde(rename = "terms_and_conditions")]
    TermsAndConditions,
    #[serde(untagged)]
    Other(String),
}
