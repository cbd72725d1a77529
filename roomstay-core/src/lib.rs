pub mod gateway;
pub mod repository;
pub mod reservation;
pub mod residence;

pub use gateway::{GatewayError, ProviderPaymentStatus, ProviderRefundStatus, RefundGateway};
pub use repository::{ReservationRepository, RoomRepository, StoreError};
pub use reservation::{
    GuestDetails, PaymentRecord, RefundStatus, Reservation, ReservationStatus, ReservedRange,
};
pub use residence::{Residence, Room};
