use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::signing::{source::upload_source, ActionSource};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadDto {
    #[serde(default)]
    pub stage_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub image_names: Vec<String>,
}

impl ActionSource for UploadDto {
    // the client signs the trimmed nickname
    fn signing_source(&self) -> String {
        upload_source(&self.stage_id, self.nickname.trim(), &self.image_names)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadReceipt {
    pub stage_id: String,
    pub nickname: String,
    pub image_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadResponse {
    pub success: bool,
    pub data: UploadReceipt,
}
