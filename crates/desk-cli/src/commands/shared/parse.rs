use serde::de::DeserializeOwned;

/// Parse a `SCREAMING_SNAKE_CASE` wire enum from user input, accepting any
/// case and `-` for `_`.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
    let json = serde_json::Value::String(normalized);
    serde_json::from_value(json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use desk_core::enums::InvitationStatus;

    use super::parse_enum;

    #[test]
    fn parses_lowercase_input() {
        let status: InvitationStatus = parse_enum("pending", "status").expect("status should parse");
        assert_eq!(status, InvitationStatus::Pending);
    }

    #[test]
    fn parses_wire_spelling() {
        let status: InvitationStatus =
            parse_enum("CANCELLED", "status").expect("status should parse");
        assert_eq!(status, InvitationStatus::Cancelled);
    }
}
