use serde_json::{Map, Value, json};
use shamir_recover::{
    BigInt, Classification, Config, Polynomial, RecoverError, SecretReconstructor, Share,
    ShareDocument, report,
};
use std::fs;
use tempfile::tempdir;

/// Builds a document whose shares are written in rotating bases
fn encode_document(shares: &[Share], k: usize) -> String {
    let bases = [10u32, 16, 2, 7, 36, 3];
    let mut doc = Map::new();
    doc.insert("keys".into(), json!({ "n": shares.len(), "k": k }));
    for (i, share) in shares.iter().enumerate() {
        let base = bases[i % bases.len()];
        doc.insert(
            share.x().to_string(),
            json!({ "base": base.to_string(), "value": share.y().to_str_radix(base) }),
        );
    }
    Value::Object(doc).to_string()
}

#[test]
fn test_sample_document_end_to_end() {
    let text = r#"{
        "keys": { "n": 4, "k": 3 },
        "1": { "base": "10", "value": "4" },
        "2": { "base": "2", "value": "111" },
        "3": { "base": "10", "value": "12" },
        "6": { "base": "4", "value": "213" }
    }"#;

    let doc = ShareDocument::from_json_str(text).unwrap();
    let shares = doc.shares().unwrap();

    let subset = SecretReconstructor::builder(doc.threshold())
        .build()
        .unwrap()
        .reconstruct(&shares)
        .unwrap()
        .into_found()
        .unwrap();
    assert_eq!(subset.secret(), &BigInt::from(3));
    // the share at x = 6 lies on the curve but is outside the accepted subset
    assert_eq!(subset.wrong_shares(), &[Share::new(6, 39)]);

    let on_curve = SecretReconstructor::builder(doc.threshold())
        .with_config(Config::new().with_classification(Classification::OnPolynomial))
        .build()
        .unwrap()
        .reconstruct(&shares)
        .unwrap()
        .into_found()
        .unwrap();
    assert!(on_curve.wrong_shares().is_empty());
    assert_eq!(on_curve.polynomial(), subset.polynomial());
}

#[test]
fn test_large_document_with_corrupted_shares() {
    let secret: BigInt = "79836264049851".parse().unwrap();
    let poly = Polynomial::new(vec![
        secret.clone(),
        "-123456789123456789".parse().unwrap(),
        BigInt::from(987_654_321),
        BigInt::from(-5),
        BigInt::from(1),
    ]);

    let mut shares: Vec<Share> = (1..=9)
        .map(|x| Share::new(x, poly.evaluate(&BigInt::from(x))))
        .collect();
    shares[0] = Share::new(1, shares[0].y() + 7);
    shares[3] = Share::new(4, shares[3].y() - 1);

    let doc = ShareDocument::from_json_str(&encode_document(&shares, 5)).unwrap();
    assert_eq!(doc.declared_count(), Some(9));
    assert_eq!(doc.shares().unwrap(), shares);

    let found = SecretReconstructor::builder(doc.threshold())
        .with_config(Config::new().with_classification(Classification::OnPolynomial))
        .build()
        .unwrap()
        .reconstruct(&doc.shares().unwrap())
        .unwrap()
        .into_found()
        .unwrap();

    assert_eq!(found.secret(), &secret);
    assert_eq!(found.polynomial(), &poly);
    assert_eq!(found.wrong_shares(), &[shares[0].clone(), shares[3].clone()]);
}

#[test]
fn test_duplicate_x_in_document() {
    // "01" and "1" are different keys but the same x
    let text = r#"{
        "keys": { "n": 2, "k": 1 },
        "1": { "base": "10", "value": "4" },
        "01": { "base": "10", "value": "5" }
    }"#;
    let doc = ShareDocument::from_json_str(text).unwrap();
    let shares = doc.shares().unwrap();

    let result = SecretReconstructor::builder(doc.threshold())
        .build()
        .unwrap()
        .reconstruct(&shares);
    assert!(matches!(result, Err(RecoverError::InvalidInput(_))));
}

#[test]
fn test_threshold_larger_than_document() {
    let text = r#"{ "keys": { "n": 1, "k": 2 }, "1": { "base": "10", "value": "4" } }"#;
    let doc = ShareDocument::from_json_str(text).unwrap();

    let result = SecretReconstructor::builder(doc.threshold())
        .build()
        .unwrap()
        .reconstruct(&doc.shares().unwrap());
    assert!(matches!(
        result,
        Err(RecoverError::InvalidThreshold {
            threshold: 2,
            total_shares: 1
        })
    ));
}

#[test]
fn test_report_files() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("testcase2.json");
    let shares = vec![Share::new(1, 3), Share::new(2, 6), Share::new(8, 99)];
    fs::write(&source, encode_document(&shares, 2)).unwrap();

    let doc = ShareDocument::from_path(&source).unwrap();
    let outcome = SecretReconstructor::builder(doc.threshold())
        .build()
        .unwrap()
        .reconstruct(&doc.shares().unwrap())
        .unwrap();
    let found = outcome.found().unwrap();

    let out_dir = temp_dir.path().join("out");
    let saved = report::save_coefficients(&out_dir, &source, found.polynomial()).unwrap();
    assert_eq!(saved.file_name().unwrap(), "correct_keys_testcase2.txt");
    assert_eq!(
        fs::read_to_string(&saved).unwrap(),
        "Coefficient a_0 = 0\nCoefficient a_1 = 3\nSecret (constant term c): 0\n"
    );

    let json: Value = serde_json::from_str(&report::to_json(&outcome).unwrap()).unwrap();
    assert_eq!(json["status"], "found");
    assert_eq!(json["wrong"], json!([{ "x": "8", "y": "99" }]));
}
