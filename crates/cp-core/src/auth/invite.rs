/// Invite codes accepted at signup.
pub const INVITE_CODES: [&str; 3] = ["COACH2024", "BETA2024", "TRIAL2024"];

/// Case-insensitive allow-list check.
pub fn is_valid_invite_code(code: &str) -> bool {
    let code = code.trim().to_uppercase();
    INVITE_CODES.iter().any(|valid| *valid == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_codes_match_case_insensitively() {
        assert!(is_valid_invite_code("beta2024"));
        assert!(is_valid_invite_code("Coach2024"));
        assert!(is_valid_invite_code("TRIAL2024"));
    }

    #[test]
    fn unknown_invite_code_is_rejected() {
        assert!(!is_valid_invite_code("WRONG"));
        assert!(!is_valid_invite_code(""));
    }
}
