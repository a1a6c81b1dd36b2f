#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct SuccessBody {
    pub success: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
