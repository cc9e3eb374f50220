#[cfg(test)]
mod test {

    use chrono::{TimeZone, Utc};

    use crate::cache::token::Token;
    use crate::sinks::exec_credential::ExecCredential;

    #[test]
    fn exec_credential_document_shape() {
        let expires_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 15, 0).unwrap();
        let credential = ExecCredential::new(&Token::new("k8s-aws-v1.abc"), expires_at);

        let json: serde_json::Value = serde_json::from_str(&credential.to_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "ExecCredential");
        assert_eq!(json["apiVersion"], "client.authentication.k8s.io/v1beta1");
        assert_eq!(json["spec"], serde_json::json!({}));
        assert_eq!(json["status"]["token"], "k8s-aws-v1.abc");
        assert_eq!(json["status"]["expirationTimestamp"], "2024-01-01T00:15:00Z");
    }
}
