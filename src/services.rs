pub mod auth;
pub mod checkout_service;
pub mod identity;
pub mod invite_service;
pub mod organization_service;
pub mod payment;
pub mod policy;
pub mod public_service;
pub mod qr_code;
