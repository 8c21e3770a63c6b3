// Copyright (c) 2024 Mike Tsao

//! The structural-code grammar: comma-separated tokens, each either a bare
//! `0`/`1` or a run `<count>*<0|1>`, expanded left to right. Position 0 is
//! the first bit written.

use crate::error::StructureError;
use bit_vec::BitVec;

/// Runs at least this long are written as `count*digit`.
pub const DEFAULT_RLE_THRESHOLD: usize = 3;

/// Expands `code` into a bit-vector that must be exactly `order` bits long.
pub fn parse_structural_code(code: &str, order: usize) -> Result<BitVec, StructureError> {
    let mut bits = BitVec::with_capacity(order);
    for (index, raw) in code.split(',').enumerate() {
        let token = raw.trim();
        let malformed = || StructureError::MalformedToken {
            index,
            token: token.to_string(),
        };
        let (count, digit) = match token.split_once('*') {
            Some((count, digit)) => {
                let count = count
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|c| *c > 0)
                    .ok_or_else(malformed)?;
                (count, parse_digit(digit.trim()).ok_or_else(malformed)?)
            }
            None => (1, parse_digit(token).ok_or_else(malformed)?),
        };
        // Don't let a huge run count allocate before the length check fails.
        if bits.len().checked_add(count).map_or(true, |n| n > order) {
            return Err(StructureError::LengthMismatch {
                expected: order,
                actual: expanded_len(code).unwrap_or(bits.len().saturating_add(count)),
            });
        }
        bits.grow(count, digit);
    }
    if bits.len() != order {
        return Err(StructureError::LengthMismatch {
            expected: order,
            actual: bits.len(),
        });
    }
    Ok(bits)
}

fn parse_digit(s: &str) -> Option<bool> {
    match s {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

// Used only to report an accurate length in errors.
fn expanded_len(code: &str) -> Option<usize> {
    code.split(',').try_fold(0usize, |sum, token| {
        let count = match token.trim().split_once('*') {
            Some((count, _)) => count.trim().parse::<usize>().ok()?,
            None => 1,
        };
        sum.checked_add(count)
    })
}

/// Encodes `bits` with the default run-length threshold.
pub fn to_structural_code(bits: &BitVec) -> String {
    to_structural_code_with_threshold(bits, DEFAULT_RLE_THRESHOLD)
}

/// Encodes `bits`, compressing runs of `threshold` or more equal bits. A
/// threshold of 0 or 1 compresses every run.
pub fn to_structural_code_with_threshold(bits: &BitVec, threshold: usize) -> String {
    let mut tokens = Vec::default();
    let mut iter = bits.iter().peekable();
    while let Some(bit) = iter.next() {
        let mut run = 1;
        while iter.peek() == Some(&bit) {
            iter.next();
            run += 1;
        }
        let digit = if bit { "1" } else { "0" };
        if run >= threshold.max(1) && (run > 1 || threshold <= 1) {
            tokens.push(format!("{run}*{digit}"));
        } else {
            tokens.extend(core::iter::repeat(digit.to_string()).take(run));
        }
    }
    tokens.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(bits: &BitVec) -> Vec<usize> {
        bits.iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
            .collect()
    }

    #[test]
    fn parse_mainline() {
        let bits = parse_structural_code("1,3*0,1,7*0", 12).unwrap();
        assert_eq!(bits.len(), 12);
        assert_eq!(positions(&bits), vec![0, 4]);

        let bits = parse_structural_code("1,0,1,0,1,1,0,1,0,1,0,1", 12).unwrap();
        assert_eq!(positions(&bits), vec![0, 2, 4, 5, 7, 9, 11]);

        let bits = parse_structural_code(" 12*1 ", 12).unwrap();
        assert!(bits.all());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_structural_code("1,3*0,1,6*0", 12),
            Err(StructureError::LengthMismatch {
                expected: 12,
                actual: 11
            })
        );
        assert_eq!(
            parse_structural_code("1,3*0,1,8*0", 12),
            Err(StructureError::LengthMismatch {
                expected: 12,
                actual: 13
            })
        );
        assert_eq!(
            parse_structural_code("1,2,9*0", 11),
            Err(StructureError::MalformedToken {
                index: 1,
                token: "2".to_string()
            })
        );
        assert!(matches!(
            parse_structural_code("0*1,12*0", 12),
            Err(StructureError::MalformedToken { index: 0, .. })
        ));
        assert!(matches!(
            parse_structural_code("3*2,9*0", 12),
            Err(StructureError::MalformedToken { index: 0, .. })
        ));
        assert!(matches!(
            parse_structural_code("", 12),
            Err(StructureError::MalformedToken { index: 0, .. })
        ));
        assert!(matches!(
            parse_structural_code("1,,11*0", 12),
            Err(StructureError::MalformedToken { index: 1, .. })
        ));
        assert!(matches!(
            parse_structural_code("99999999999*1", 12),
            Err(StructureError::LengthMismatch { expected: 12, .. })
        ));
    }

    #[test]
    fn encode_uses_runs() {
        let bits = parse_structural_code("1,3*0,1,7*0", 12).unwrap();
        assert_eq!(to_structural_code(&bits), "1,3*0,1,7*0");

        let bits = parse_structural_code("1,1,0,0,1", 5).unwrap();
        assert_eq!(
            to_structural_code(&bits),
            "1,1,0,0,1",
            "Runs shorter than the threshold stay bare"
        );
        assert_eq!(to_structural_code_with_threshold(&bits, 2), "2*1,2*0,1");
        assert_eq!(to_structural_code_with_threshold(&bits, 1), "2*1,2*0,1*1");
        assert_eq!(
            to_structural_code_with_threshold(&bits, usize::MAX),
            "1,1,0,0,1"
        );
    }

    #[test]
    fn encode_round_trips_every_vector() {
        for order in 1..=10 {
            for number in 0u32..(1 << order) {
                let bits = BitVec::from_fn(order, |i| (number >> i) & 1 == 1);
                for threshold in [1, 2, 3, 5] {
                    let code = to_structural_code_with_threshold(&bits, threshold);
                    assert_eq!(
                        parse_structural_code(&code, order).unwrap(),
                        bits,
                        "code {code} should parse back to the same bits"
                    );
                }
            }
        }
    }
}
