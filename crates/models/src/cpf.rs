//! CPF (Brazilian taxpayer id) checksum validation.
//!
//! A CPF has 11 digits; the last two are check digits computed from the
//! first nine with mod-11 weighted sums. Formatting characters such as
//! `529.982.247-25` are ignored.

pub const CPF_LEN: usize = 11;

const FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Strip everything but ASCII digits.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check length, reject repeated-digit sequences, then verify both check digits.
///
/// ```
/// assert!(models::cpf::is_valid("529.982.247-25"));
/// assert!(models::cpf::is_valid("52998224725"));
/// assert!(!models::cpf::is_valid("52998224726"));
/// assert!(!models::cpf::is_valid("111.111.111-11"));
/// ```
pub fn is_valid(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CPF_LEN || digits.windows(2).all(|w| w[0] == w[1]) {
        return false;
    }
    let first = check_digit(&digits[..9], &FIRST_WEIGHTS);
    let second = check_digit(&digits[..10], &SECOND_WEIGHTS);
    digits[9] == first && digits[10] == second
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Render as `XXX.XXX.XXX-XX`; `None` unless the input holds exactly 11 digits.
pub fn format(raw: &str) -> Option<String> {
    let d = normalize(raw);
    if d.len() != CPF_LEN {
        return None;
    }
    Some(format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]))
}
