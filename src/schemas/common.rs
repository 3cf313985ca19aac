use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct OkResponse {
    pub message: String,
}

impl Default for OkResponse {
    fn default() -> Self {
        Self {
            message: "ok".to_string(),
        }
    }
}
