//! Pure score arithmetic.
//!
//! Means are plain `f64` divisions. Rounding to two decimals looks at the
//! exact binary value of the float and breaks exact ties to even, so
//! `2.675` (stored as `2.67499999...`) becomes `2.67` and `0.125` becomes
//! `0.12`.

use super::domain::{DerivedScore, RosterStatistics, StudentRecord, SUBJECTS};

/// Split a finite, non-negative float into `(mantissa, exponent)` with
/// `x == mantissa * 2^exponent`.
fn decompose(x: f64) -> (u64, i32) {
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    }
}

/// Round to two decimal places, ties to even on the exact binary value.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let (mantissa, exponent) = decompose(x.abs());
    if exponent >= 0 {
        // already an integer
        return x;
    }
    let shift = exponent.unsigned_abs();
    // below 2^-67 the value times 100 is under one half
    if shift >= 120 {
        return 0.0_f64.copysign(x);
    }
    let scaled = u128::from(mantissa) * 100;
    let mut hundredths = scaled >> shift;
    let remainder = scaled - (hundredths << shift);
    let half = 1u128 << (shift - 1);
    if remainder > half || (remainder == half && hundredths & 1 == 1) {
        hundredths += 1;
    }
    (hundredths as f64 / 100.0).copysign(x)
}

/// Mean of the four subject means, summed exactly so the only rounding is
/// the final conversion back to `f64`.
fn mean_of_subjects(means: [f64; 4]) -> f64 {
    let parts: Vec<(u64, i32)> = means.iter().filter(|m| **m > 0.0).map(|m| decompose(*m)).collect();
    let Some(min_exp) = parts.iter().map(|(_, e)| *e).min() else {
        return 0.0;
    };
    let exact = parts.iter().try_fold(0u128, |acc, &(m, e)| {
        let shift = (e - min_exp).unsigned_abs();
        let m = u128::from(m);
        (m.leading_zeros() >= shift).then(|| m << shift).and_then(|v| acc.checked_add(v))
    });
    match exact {
        // dividing by four only moves the exponent
        Some(sum) => sum as f64 * 2f64.powi(min_exp) / SUBJECTS.len() as f64,
        None => means.iter().sum::<f64>() / SUBJECTS.len() as f64,
    }
}

pub fn derive(record: &StudentRecord) -> DerivedScore {
    let total = record.total();
    DerivedScore {
        name: record.name.clone(),
        korean: record.korean,
        english: record.english,
        math: record.math,
        science: record.science,
        total,
        average: round2(f64::from(total) / 4.0),
    }
}

/// Aggregate statistics, or `None` for an empty roster.
pub fn statistics(records: &[StudentRecord]) -> Option<RosterStatistics> {
    let first = records.first()?;
    let count = records.len() as f64;

    let mut sums = [0u64; 4];
    let mut top = first;
    let mut top_total = first.total();
    for record in records {
        for (sum, score) in sums.iter_mut().zip(record.scores()) {
            *sum += u64::from(score);
        }
        // strictly greater: the earliest record keeps a tied maximum
        let total = record.total();
        if total > top_total {
            top = record;
            top_total = total;
        }
    }

    let subject_means = sums.map(|sum| round2(sum as f64 / count));

    Some(RosterStatistics {
        total_students: records.len(),
        average_korean: subject_means[0],
        average_english: subject_means[1],
        average_math: subject_means[2],
        average_science: subject_means[3],
        overall_average: round2(mean_of_subjects(subject_means)),
        top_student: top.name.clone(),
    })
}
