use serde_json::Value;

/// Keys the upstream is known to deliver the verification code under.
const CODE_KEYS: [&str; 4] = ["code", "verificationCode", "otp", "otpCode"];

/// Searches an arbitrary response payload for a verification code.
///
/// The upstream answer shape varies between deployments: the code may sit at
/// the top level, under a `result` envelope, or deeper. Matching is
/// depth-first in document order, case-insensitive on key names.
pub(crate) fn extract_code(payload: &Value) -> Option<String> {
    match payload {
        Value::Object(map) => {
            for (key, value) in map {
                if CODE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                    match value {
                        Value::String(s) => return Some(s.clone()),
                        Value::Number(n) => return Some(n.to_string()),
                        _ => {}
                    }
                }
                if let Some(found) = extract_code(value) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(extract_code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_top_level_code() {
        let payload = json!({"code": "123456"});
        assert_eq!(extract_code(&payload), Some("123456".to_string()));
    }

    #[test]
    fn finds_code_inside_result_envelope() {
        let payload = json!({"status": 200, "result": {"code": "654321"}});
        assert_eq!(extract_code(&payload), Some("654321".to_string()));
    }

    #[test]
    fn finds_aliased_keys() {
        let payload = json!({"result": {"otpCode": "9999"}});
        assert_eq!(extract_code(&payload), Some("9999".to_string()));
        let payload = json!({"verificationCode": "8888"});
        assert_eq!(extract_code(&payload), Some("8888".to_string()));
    }

    #[test]
    fn stringifies_numeric_codes() {
        let payload = json!({"result": {"code": 4711}});
        assert_eq!(extract_code(&payload), Some("4711".to_string()));
    }

    #[test]
    fn searches_arrays() {
        let payload = json!({"items": [{"noise": 1}, {"otp": "2468"}]});
        assert_eq!(extract_code(&payload), Some("2468".to_string()));
    }

    #[test]
    fn absent_code_yields_none() {
        let payload = json!({"status": 200, "message": "sent"});
        assert_eq!(extract_code(&payload), None);
    }
}
