/// Database models for Userboard
///
/// # Models
///
/// - `user`: Users shown on the listing page
///
/// All operations take a `&mut MySqlConnection` obtained from
/// [`crate::db::provision::acquire_connection`].

pub mod user;
