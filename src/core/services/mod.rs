pub mod bill_service;
pub mod budget_service;
pub mod subscription_service;

pub use bill_service::BillService;
pub use budget_service::BudgetService;
pub use subscription_service::SubscriptionService;

use crate::errors::PlannerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("Not found: {0}")]
    NotFound(String),
}
