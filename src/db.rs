pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod link_repo;
pub use link_repo::LinkRepository;
pub mod location_repo;
pub use location_repo::LocationRepository;
pub mod membership_repo;
pub use membership_repo::MembershipRepository;
pub mod organization_repo;
pub use organization_repo::OrganizationRepository;
pub mod public_repo;
pub use public_repo::{PublicRepository, PublicStore};
pub mod rbac_repo;
pub use rbac_repo::{PlatformRoles, RbacRepository};
pub mod tag_repo;
pub use tag_repo::TagRepository;
