//! EAN-13 style check digit.
//!
//! Digits are consumed least-significant first with alternating weights, and
//! each weighted product is reduced modulo 10 *before* it is accumulated. This
//! differs from the textbook formula for digits >= 4 and must be preserved for
//! existing labels to keep scanning.

/// Weight applied to the last digit when generating a check digit over the inner code
pub const GENERATE_WEIGHT: u64 = 3;

/// Weight applied to the check digit itself when verifying a full barcode
pub const VERIFY_WEIGHT: u64 = 1;

/// Compute the check digit of `code` starting from `initial_weight` (1 or 3)
#[must_use]
pub fn calculate_ean(mut code: u64, initial_weight: u64) -> u64 {
    let mut sum = 0;
    let mut weight = initial_weight;
    while code > 0 {
        let digit = code % 10;
        code /= 10;
        sum += digit * weight % 10;
        weight = if weight == 1 { 3 } else { 1 };
    }
    (10 - sum % 10) % 10
}

/// Check digit to append to a 12-digit inner code
#[must_use]
pub fn calculate_ean13(code: u64) -> u64 {
    calculate_ean(code, GENERATE_WEIGHT)
}

/// A full barcode is consistent when its digits, check digit included, reduce to zero
#[must_use]
pub fn is_valid_ean13(code: u64) -> bool {
    calculate_ean(code, VERIFY_WEIGHT) == 0
}
