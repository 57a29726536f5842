//! Key layout of the keyed store. Per-user collections are scoped by suffixing
//! the user id.

use std::fmt::Display;

/// Every registered user.
pub const USERS: &str = "kalahasta_users";

/// The signed-in user, if any.
pub const SESSION: &str = "kalahasta_user";

pub fn products<U: Display>(user_id: U) -> String {
    format!("kalahasta_products_{}", user_id)
}

pub fn recordings<U: Display>(user_id: U) -> String {
    format!("kalahasta_recordings_{}", user_id)
}

/// Soft-deleted recordings.
pub fn delete_bin<U: Display>(user_id: U) -> String {
    format!("kalahasta_delete_bin_{}", user_id)
}

pub fn certifications<U: Display>(user_id: U) -> String {
    format!("kalahasta_certifications_{}", user_id)
}

/// All per-user keys, in the order they are cleared on account deletion.
pub fn user_scoped<U: Display>(user_id: U) -> [String; 4] {
    [
        products(&user_id),
        recordings(&user_id),
        delete_bin(&user_id),
        certifications(&user_id),
    ]
}
