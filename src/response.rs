use serde::Serialize;

/// Response envelope shared by every endpoint: `{success, message?, data?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_string(&ApiResponse::message("News deleted successfully"))
            .expect("serialize");
        assert_eq!(
            json,
            r#"{"success":true,"message":"News deleted successfully"}"#
        );
    }

    #[test]
    fn data_envelope_keeps_payload_under_data_key() {
        #[derive(Serialize)]
        struct Payload {
            value: u32,
        }
        let json =
            serde_json::to_string(&ApiResponse::data(Payload { value: 7 })).expect("serialize");
        assert_eq!(json, r#"{"success":true,"data":{"value":7}}"#);
    }
}
