#![no_main]

use libfuzzer_sys::fuzz_target;
use shamir_recover::ShareDocument;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

// Fuzzing target for share document loading
//
// Feeds arbitrary bytes through ShareDocument::from_json_str and from_path and
// decodes whatever entries parse. Malformed JSON, missing keys, unknown bases,
// digits outside the base and non-numeric x values must all surface as errors.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(doc) = ShareDocument::from_json_str(text) {
            let _threshold = doc.threshold();
            let _shares = doc.shares();
        }
    }

    let temp_dir = match tempdir() {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let path = temp_dir.path().join("shares.json");
    let mut file = match File::create(&path) {
        Ok(file) => file,
        Err(_) => return,
    };
    if file.write_all(data).is_err() {
        return;
    }
    drop(file);

    if let Ok(doc) = ShareDocument::from_path(&path) {
        let _shares = doc.shares();
    }
});
