/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User listing page and user creation
/// - `page`: HTML rendering for the listing page

pub mod health;
pub mod page;
pub mod users;
