pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod links;
pub mod locations;
pub mod onboarding;
pub mod public;
pub mod settings;
pub mod tags;
pub mod team;
