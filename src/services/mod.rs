// Business logic services

pub mod preference_service;
pub mod plan_service;
pub mod machine_service;
pub mod subscription_service;
pub mod ad_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use preference_service::PreferenceService;
pub use plan_service::PlanService;
pub use machine_service::MachineService;
pub use subscription_service::SubscriptionService;
pub use ad_service::AdService;
pub use user_service::UserService;
