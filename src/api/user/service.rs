use crate::{
    accounts::Account,
    api::auth::{dtos::SignatureQuery, service::verify_signed_action},
    app_context::AppContext,
};

use super::{dtos::RegisterDto, error::UserError};

// Signature first: an unsigned caller learns nothing about the body, not
// even whether an email is taken.
pub(crate) async fn register(
    ctx: &AppContext,
    query: SignatureQuery,
    user_agent: Option<&str>,
    register_dto: RegisterDto,
) -> Result<Account, UserError> {
    let challenge = verify_signed_action(ctx, query, user_agent, &register_dto)?;

    let account = ctx
        .accounts
        .register(
            &register_dto.email,
            &register_dto.password,
            &register_dto.nickname,
        )
        .map_err(|e| {
            log::info!(
                "Registration for session {} refused: {}",
                challenge.session_id,
                e
            );
            e
        })?;
    log::info!("Registered account {} ({})", account.id, account.nickname);
    Ok(account)
}
