use crate::{
    api::auth::{dtos::SignatureQuery, service::verify_signed_action},
    app_context::AppContext,
};

use super::{
    dtos::{UploadDto, UploadReceipt},
    error::HomeworkError,
};

// "<chapter>-<stage>", both decimal
fn is_valid_stage_id(stage_id: &str) -> bool {
    match stage_id.split_once('-') {
        Some((chapter, stage)) => {
            !chapter.is_empty()
                && !stage.is_empty()
                && chapter.bytes().all(|b| b.is_ascii_digit())
                && stage.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

pub(crate) async fn upload(
    ctx: &AppContext,
    query: SignatureQuery,
    user_agent: Option<&str>,
    upload_dto: UploadDto,
) -> Result<UploadReceipt, HomeworkError> {
    // malformed uploads are refused before they can burn a challenge
    let nickname = upload_dto.nickname.trim();
    if upload_dto.stage_id.is_empty() || nickname.is_empty() {
        return Err(HomeworkError::MissingFields);
    }
    if !is_valid_stage_id(&upload_dto.stage_id) {
        return Err(HomeworkError::InvalidStageId(upload_dto.stage_id));
    }

    let challenge = verify_signed_action(ctx, query, user_agent, &upload_dto)?;

    log::info!(
        "Accepted upload of {} images for stage {} (session {})",
        upload_dto.image_names.len(),
        upload_dto.stage_id,
        challenge.session_id
    );
    Ok(UploadReceipt {
        nickname: nickname.to_string(),
        image_count: upload_dto.image_names.len(),
        stage_id: upload_dto.stage_id,
    })
}
