/// Deterministic concatenation of an action's semantic fields, in the fixed
/// order the client signs them.
pub trait ActionSource {
    fn signing_source(&self) -> String;
}

// email + nickname + password
pub fn register_source(email: &str, nickname: &str, password: &str) -> String {
    format!("{}{}{}", email, nickname, password)
}

// stageId + nickname + image names sorted and joined
pub fn upload_source(stage_id: &str, nickname: &str, image_names: &[String]) -> String {
    let mut names: Vec<&str> = image_names.iter().map(String::as_str).collect();
    names.sort_unstable();
    format!("{}{}{}", stage_id, nickname, names.concat())
}
