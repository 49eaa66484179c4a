/// One-time verification codes
///
/// Client signups receive a 6-digit numeric code by email. The code has no
/// expiry and no attempt counter; verification is a single string-equality
/// match against the stored value. That unbounded validity is a known
/// security gap inherited from the verification flow's design, kept
/// deliberately rather than silently tightened.

use rand::Rng;

/// Number of digits in a verification code
pub const OTP_LENGTH: usize = 6;

/// Generates a random 6-digit numeric code
///
/// Leading zeros are allowed, so the result is always exactly
/// [`OTP_LENGTH`] characters.
///
/// # Example
///
/// ```
/// use workhub_shared::otp::{generate_otp, OTP_LENGTH};
///
/// let otp = generate_otp();
/// assert_eq!(otp.len(), OTP_LENGTH);
/// assert!(otp.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    (0..OTP_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10)))
        .collect()
}
