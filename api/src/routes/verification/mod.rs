//! OTP verification routes

mod resend_otp;
mod status;
mod test_email;
mod verify_otp;

pub use resend_otp::resend_otp;
pub use status::verification_status;
pub use test_email::test_email;
pub use verify_otp::verify_otp;
