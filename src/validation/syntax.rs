/// Maximum length of a complete address (RFC 5321 path limit minus the angle brackets).
const MAX_ADDRESS_LEN: usize = 254;
/// Maximum length of the local part (RFC 5321 section 4.5.3.1.1).
const MAX_LOCAL_LEN: usize = 64;
/// Maximum length of a single domain label (RFC 1035).
const MAX_LABEL_LEN: usize = 63;

/// Checks that an email address is syntactically valid and addressable on the
/// public internet.
///
/// The local part must be a dot-atom (RFC 5322) and may carry UTF-8 characters
/// (RFC 6531); quoted local parts such as `"john doe"@example.com` are not
/// accepted. The domain must be a dotted host name: domain literals such as
/// `user@[192.0.2.1]` and single-label hosts such as `user@localhost` are
/// rejected, as is a numeric top-level label.
///
/// # Examples
/// ```
/// use contact_api::validation::syntax::is_valid_email;
///
/// assert!(is_valid_email("user.name+tag@example.com"));
/// assert!(is_valid_email("Pelé@exämple.中国"));
/// assert!(!is_valid_email("invalid-email"));
/// assert!(!is_valid_email("user@localhost"));
/// assert!(!is_valid_email("\"with space\"@example.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_ADDRESS_LEN {
        return false;
    }

    let Some((local_part, domain_part)) = email.split_once('@') else {
        return false;
    };

    local_part.len() <= MAX_LOCAL_LEN
        && is_valid_dot_atom(local_part)
        && is_valid_domain_name(domain_part)
}

/// Dot-atom form (RFC 5322 section 3.2.3).
fn is_valid_dot_atom(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|atom| {
            !atom.is_empty()
                && atom
                    .chars()
                    .all(|c| c.is_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c))
        })
}

fn is_valid_domain_name(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let tld_is_numeric = labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()));

    !tld_is_numeric && labels.iter().all(|label| is_valid_label(label))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
}
