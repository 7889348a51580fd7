pub mod auth;
pub mod checkout;
pub mod dashboard;
pub mod link;
pub mod location;
pub mod membership;
pub mod organization;
pub mod public;
pub mod rbac;
pub mod tag;
