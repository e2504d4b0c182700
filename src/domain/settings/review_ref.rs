//! Personal review-branch reference derived from SSH client configuration.
//!
//! The lookup is textual: the first occurrence of the Gerrit host in the
//! file anchors the search, and the first `User` token after it supplies
//! the username from the same line. Multi-host files where another entry
//! sits between the host and its user line resolve to whichever `User`
//! comes first.

const USER_TOKEN: &str = "User";

/// Format a personal review-branch reference for `username`.
pub fn review_ref_for(username: &str) -> String {
    format!("refs/personal/{}/submodule_updater", username)
}

/// Line holding the first `User` token after the first mention of `host`.
fn user_line<'a>(ssh_config: &'a str, host: &str) -> Option<&'a str> {
    if host.is_empty() {
        return None;
    }
    let host_loc = ssh_config.find(host)?;
    let user_loc = host_loc + ssh_config[host_loc..].find(USER_TOKEN)?;
    ssh_config[user_loc..].lines().next()
}

/// Extract the username that follows the first mention of `host`.
pub fn ssh_username_for_host<'a>(ssh_config: &'a str, host: &str) -> Option<&'a str> {
    user_line(ssh_config, host)?.split_whitespace().nth(1)
}

/// Derive the review reference, falling back to `fallback_username` when the
/// matched `User` line carries no name.
///
/// Returns `None` when the host is not mentioned at all, or when no `User`
/// token follows it.
pub fn derive_review_ref(
    ssh_config: &str,
    host: &str,
    fallback_username: Option<&str>,
) -> Option<String> {
    let line = user_line(ssh_config, host)?;
    let username = line
        .split_whitespace()
        .nth(1)
        .or_else(|| fallback_username.map(str::trim).filter(|name| !name.is_empty()))?;

    Some(review_ref_for(username))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_reference_from_matching_host_block() {
        let config = "Host example.com\n  User alice\n";
        assert_eq!(
            derive_review_ref(config, "example.com", None).as_deref(),
            Some("refs/personal/alice/submodule_updater")
        );
    }

    #[test]
    fn host_not_mentioned_derives_nothing() {
        let config = "Host other.org\n  User alice\n";
        assert_eq!(derive_review_ref(config, "example.com", Some("bob")), None);
    }

    #[test]
    fn no_user_after_host_derives_nothing() {
        let config = "Host other.org\n  User alice\nHost example.com\n  Port 29418\n";
        assert_eq!(derive_review_ref(config, "example.com", Some("bob")), None);
    }

    #[test]
    fn first_textual_match_wins_even_inside_another_block() {
        // HostName of the first block mentions the host; its User line is taken.
        let config = "Host gerrit\n  HostName example.com\n  User first\n\
                      Host example.com\n  User second\n";
        assert_eq!(
            derive_review_ref(config, "example.com", None).as_deref(),
            Some("refs/personal/first/submodule_updater")
        );
    }

    #[test]
    fn user_from_following_block_is_taken_when_own_block_has_none() {
        let config = "Host example.com\n  Port 29418\nHost other.org\n  User carol\n";
        assert_eq!(
            derive_review_ref(config, "example.com", None).as_deref(),
            Some("refs/personal/carol/submodule_updater")
        );
    }

    #[test]
    fn user_token_matches_inside_longer_keywords() {
        let config = "Host example.com\n  UserKnownHostsFile /dev/null\n  User dave\n";
        assert_eq!(ssh_username_for_host(config, "example.com"), Some("/dev/null"));
    }

    #[test]
    fn tabs_and_repeated_spaces_separate_tokens() {
        let config = "Host example.com\n\tUser\t\t erin   # ops\n";
        assert_eq!(ssh_username_for_host(config, "example.com"), Some("erin"));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let config = "Host example.com\n  User frank";
        assert_eq!(ssh_username_for_host(config, "example.com"), Some("frank"));
    }

    #[test]
    fn bare_user_keyword_falls_back_to_configured_username() {
        let config = "Host example.com\n  User\n";
        assert_eq!(
            derive_review_ref(config, "example.com", Some("gerrit-bot")).as_deref(),
            Some("refs/personal/gerrit-bot/submodule_updater")
        );
    }

    #[test]
    fn bare_user_keyword_without_fallback_derives_nothing() {
        let config = "Host example.com\n  User\n";
        assert_eq!(derive_review_ref(config, "example.com", None), None);
        assert_eq!(derive_review_ref(config, "example.com", Some("  ")), None);
    }

    #[test]
    fn empty_host_derives_nothing() {
        assert_eq!(derive_review_ref("Host x\n User y\n", "", Some("bob")), None);
    }
}
