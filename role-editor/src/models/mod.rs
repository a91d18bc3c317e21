pub mod permission;
pub mod role;

pub use permission::{section_display_name, BoundRoute, PermissionAction, PermissionSection};
pub use role::Role;
