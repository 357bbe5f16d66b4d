//! Diesel schema for account persistence.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Account identifier.
        #[max_length = 64]
        id -> Varchar,
        /// Normalized login email.
        #[max_length = 320]
        email -> Varchar,
        /// Salted password digest.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Account role.
        #[max_length = 16]
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
