//! Payout settlement: models and service

pub mod model;
pub mod service;

pub use model::{
    BankDetails, CommissionSplit, ListPayoutsQuery, PaymentMethod, Payout, PayoutDetails,
    PayoutStats, PayoutStatus, RequestPayoutRequest, UpdatePayoutStatusRequest,
};
pub use service::PayoutService;
