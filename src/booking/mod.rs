//! Booking lifecycle: models and service

pub mod model;
pub mod service;

pub use model::{
    Booking, BookingDetails, BookingStatus, CreateBookingRequest, PaymentStatus,
    UpdateBookingStatusRequest, VendorBookingStats,
};
pub use service::BookingService;
