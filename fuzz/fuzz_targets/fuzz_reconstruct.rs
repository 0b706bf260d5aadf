#![no_main]

use libfuzzer_sys::fuzz_target;
use shamir_recover::{Config, SearchMode, SecretReconstructor, Share, fit, reconstruct};

// Fuzzing target for the candidate search
//
// Builds a small share set from the input, with signed x and y values that may
// repeat, and runs the search in both modes. Duplicate x values, thresholds
// larger than the share count and inconsistent shares must all come back as a
// Result. When a polynomial is found it has to pass through every accepted share,
// and both modes have to agree.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // Keep the search space small: at most 10 shares
    let threshold = data[0] as usize % 6;
    let shares: Vec<Share> = data[1..]
        .chunks_exact(2)
        .take(10)
        .map(|pair| Share::new(pair[0] as i8, (pair[1] as i8) as i64 * 37))
        .collect();

    let sequential = reconstruct(&shares, threshold);
    let parallel = SecretReconstructor::builder(threshold)
        .with_config(Config::new().with_mode(SearchMode::Parallel))
        .build()
        .and_then(|r| r.reconstruct(&shares));

    match (&sequential, &parallel) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        _ => panic!("modes disagree: {sequential:?} vs {parallel:?}"),
    }

    if let Ok(outcome) = sequential {
        if let Some(found) = outcome.found() {
            for share in found.accepted_shares() {
                assert_eq!(&found.polynomial().evaluate(share.x()), share.y());
            }
            assert_eq!(
                found.accepted_shares().len() + found.wrong_shares().len(),
                shares.len()
            );
        }
    }

    // Direct fits never panic, even on repeated x values
    let points: Vec<&Share> = shares.iter().take(threshold).collect();
    let _result = fit(&points);
});
